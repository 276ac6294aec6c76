use super::*;

#[test]
fn slot_counts_and_aspects() {
    assert_eq!(SlotCount::Four.slots(), 4);
    assert_eq!(SlotCount::Eight.slots(), 8);
    assert!((SlotCount::Four.aspect_ratio() - 1.0 / 3.0).abs() < 1e-12);
    assert!((SlotCount::Eight.aspect_ratio() - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn default_layout_is_plain_white() {
    let layout = LayoutSpec::new(SlotCount::Four);
    assert_eq!(layout.background, Background::Solid(Rgba8::WHITE));
    assert!(layout.frame.is_none());
    assert!(layout.stickers.is_empty());
    layout.validate().unwrap();
}

#[test]
fn builtin_swatches_are_well_formed() {
    assert_eq!(Background::gradient_presets().len(), 6);
    for (name, bg) in Background::gradient_presets() {
        assert!(!name.is_empty());
        assert!(matches!(bg, Background::LinearGradient { .. }));
    }
    assert_eq!(Background::color_palette().len(), 12);
    assert_eq!(Background::color_palette()[0], Rgba8::WHITE);
}

#[test]
fn validate_rejects_bad_sticker_placement() {
    let mut layout = LayoutSpec::new(SlotCount::Four);
    layout.stickers.push(StickerInstance {
        asset: "heart".to_string(),
        placement: Placement {
            x_pct: 50.0,
            y_pct: 50.0,
            rotation_deg: 0.0,
            scale: 0.0,
        },
    });
    assert!(layout.validate().is_err());

    layout.stickers[0].placement.scale = 1.0;
    layout.validate().unwrap();

    layout.stickers[0].placement.x_pct = f64::NAN;
    assert!(layout.validate().is_err());
}

#[test]
fn layout_spec_roundtrips_through_json() {
    let mut layout = LayoutSpec::new(SlotCount::Eight);
    layout.background = Background::gradient_presets()[0].1;
    layout.frame = Some(FrameArtwork {
        background: Some("classic-bg".to_string()),
        overlay: Some("classic-fg".to_string()),
    });
    layout.stickers.push(StickerInstance {
        asset: "heart".to_string(),
        placement: Placement {
            x_pct: 25.0,
            y_pct: 75.0,
            rotation_deg: -12.0,
            scale: 1.4,
        },
    });

    let json = serde_json::to_string(&layout).unwrap();
    let back: LayoutSpec = serde_json::from_str(&json).unwrap();
    assert_eq!(back, layout);
}

#[test]
fn validate_rejects_empty_asset_ref_and_bad_gradient() {
    let mut layout = LayoutSpec::new(SlotCount::Eight);
    layout.stickers.push(StickerInstance {
        asset: "  ".to_string(),
        placement: Placement {
            x_pct: 10.0,
            y_pct: 10.0,
            rotation_deg: 15.0,
            scale: 1.0,
        },
    });
    assert!(layout.validate().is_err());

    layout.stickers.clear();
    layout.background = Background::LinearGradient {
        from: Rgba8::WHITE,
        to: Rgba8::BLACK,
        angle_deg: f64::INFINITY,
    };
    assert!(layout.validate().is_err());
}
