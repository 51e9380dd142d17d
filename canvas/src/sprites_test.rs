use super::*;

#[test]
fn sprite_url_picks_file_by_state() {
    assert_eq!(sprite_url("/static", false), "/static/sensor.png");
    assert_eq!(sprite_url("/static", true), "/static/sensor_on.png");
}

#[test]
fn sprite_url_tolerates_trailing_slash() {
    assert_eq!(sprite_url("/static/", true), "/static/sensor_on.png");
}

#[test]
fn sprite_url_empty_base_is_relative() {
    assert_eq!(sprite_url("", false), "sensor.png");
}
