use super::*;

#[test]
fn default_config_validates() {
    let config = BoothConfig::default();
    config.validate().unwrap();
    assert_eq!(config.max_capture, 8);
    assert_eq!(config.timer_options, vec![1, 3, 5, 10]);
    assert_eq!(config.default_timer_index, 1);
}

#[test]
fn validate_rejects_degenerate_configs() {
    let ok = BoothConfig::default();

    let mut c = ok.clone();
    c.max_capture = 0;
    assert!(c.validate().is_err());

    let mut c = ok.clone();
    c.timer_options.clear();
    assert!(c.validate().is_err());

    let mut c = ok.clone();
    c.timer_options = vec![3, 0];
    assert!(c.validate().is_err());

    let mut c = ok.clone();
    c.default_timer_index = 4;
    assert!(c.validate().is_err());

    let mut c = ok.clone();
    c.output_single = PixelDims {
        width: 0,
        height: 1800,
    };
    assert!(c.validate().is_err());
}

#[test]
fn config_roundtrips_through_json() {
    let config = BoothConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    let back: BoothConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.max_capture, config.max_capture);
    assert_eq!(back.timer_options, config.timer_options);
    assert_eq!(back.inter_shot_delay, config.inter_shot_delay);
    assert_eq!(back.output_single, config.output_single);
}

#[test]
fn timer_seconds_clamps_out_of_range_indices() {
    let config = BoothConfig::default();
    assert_eq!(config.timer_seconds(0), 1);
    assert_eq!(config.timer_seconds(3), 10);
    assert_eq!(config.timer_seconds(99), 10);
}

#[test]
fn output_for_picks_resolution_by_slot_count() {
    let config = BoothConfig::default();
    assert_eq!(config.output_for(SlotCount::Four).width, 600);
    assert_eq!(config.output_for(SlotCount::Eight).width, 1200);
    assert_eq!(config.output_for(SlotCount::Four).height, 1800);
    assert_eq!(config.output_for(SlotCount::Eight).height, 1800);
}
