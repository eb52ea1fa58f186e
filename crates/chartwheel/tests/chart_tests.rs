use chartwheel::chart::{
    load_chart_data_from_json, ChartData, ChartDataError, ChartLayer, ChartSettings,
    PositionEntry, RadixChart, RecordingRenderer, RenderCall,
};
use chartwheel::layout::Universe;

fn radix_data() -> ChartData {
    ChartData::new(
        [
            ("Sun", PositionEntry::new(0.0)),
            ("Moon", PositionEntry::new(90.0)),
            ("Mars", PositionEntry::with_speed(200.0, -0.2)),
        ]
        .into_iter()
        .map(|(name, entry)| (name.to_string(), entry))
        .collect(),
    )
    .with_cusps((0..12).map(|i| 20.0 + 30.0 * i as f64).collect())
}

#[test]
fn test_radix_shift_puts_ascendant_at_setting() {
    let settings = ChartSettings::default();
    let data = radix_data();
    let radix = RadixChart::new(Universe::new(400.0, 400.0, 350.0), &data, &settings);
    assert!((radix.universe().shift - 160.0).abs() < 1e-9);

    let no_cusps = ChartData::new(data.planets.clone());
    let radix = RadixChart::new(Universe::new(400.0, 400.0, 350.0), &no_cusps, &settings);
    assert!((radix.universe().shift - 180.0).abs() < 1e-9);
}

#[test]
fn test_radix_render_draws_points_then_aspects() {
    let settings = ChartSettings::default();
    let data = radix_data();
    let radix = RadixChart::new(settings.universe(800.0, 800.0), &data, &settings);
    let mut renderer = RecordingRenderer::new();

    radix.render(&mut renderer).unwrap();

    assert_eq!(renderer.calls.len(), 2);
    match &renderer.calls[0] {
        RenderCall::Points(ChartLayer::Radix, points) => {
            assert_eq!(points.len(), 3);
            let mars = points.iter().find(|p| p.name == "Mars").unwrap();
            assert!(mars.retrograde);
            assert!((mars.radius - radix.point_radius()).abs() < 1e-9);
        }
        other => panic!("expected radix points, got {:?}", other),
    }
    match &renderer.calls[1] {
        RenderCall::Aspects(aspects) => {
            assert_eq!(aspects.len(), 1);
            assert_eq!(aspects[0].aspect.name, "square");
            assert_eq!(aspects[0].formatted_precision(), "0.0000");
        }
        other => panic!("expected aspects, got {:?}", other),
    }
}

#[test]
fn test_transit_shares_radix_orientation() {
    let settings = ChartSettings::default();
    let data = radix_data();
    let radix = RadixChart::new(settings.universe(800.0, 800.0), &data, &settings);

    let transit_data = ChartData::new(
        [("Jupiter".to_string(), PositionEntry::with_speed(92.0, 0.1))]
            .into_iter()
            .collect(),
    );
    let transit = radix.transit(transit_data);
    assert!(transit.point_radius() > radix.point_radius());
    assert_eq!(transit.projection().universe, *radix.universe());

    let aspects = transit.aspects();
    let names: Vec<(&str, &str)> = aspects
        .iter()
        .map(|a| (a.aspect.name.as_str(), a.to_point.name.as_str()))
        .collect();
    assert!(names.contains(&("square", "Sun")));
    assert!(names.contains(&("conjunction", "Moon")));
    assert!(aspects.iter().all(|a| a.point.name == "Jupiter"));

    let mut renderer = RecordingRenderer::new();
    transit.render(&mut renderer).unwrap();
    assert!(matches!(
        renderer.calls[0],
        RenderCall::Points(ChartLayer::Transit, _)
    ));
    assert!(matches!(renderer.calls[1], RenderCall::Aspects(_)));
}

#[test]
fn test_transit_apply_replaces_data() {
    let settings = ChartSettings::default();
    let data = radix_data();
    let radix = RadixChart::new(settings.universe(800.0, 800.0), &data, &settings);
    let mut transit = radix.transit(ChartData::default());
    assert!(transit.aspects().is_empty());

    transit.apply(ChartData::new(
        [("Venus".to_string(), PositionEntry::new(91.0))]
            .into_iter()
            .collect(),
    ));
    assert_eq!(transit.data().planets.len(), 1);
    assert!(transit
        .aspects()
        .iter()
        .any(|a| a.aspect.name == "conjunction" && a.to_point.name == "Moon"));
}

#[test]
fn test_load_chart_from_json() {
    let data = load_chart_data_from_json(
        r#"{
            "planets": { "Sun": [12.5], "Moon": [200.1, -0.4] },
            "cusps": [0, 30, 60, 90, 120, 150, 180, 210, 240, 270, 300, 330]
        }"#,
    )
    .unwrap();

    assert_eq!(data.planets.len(), 2);
    assert!(!data.planets["Sun"].is_retrograde());
    assert!(data.planets["Moon"].is_retrograde());
    assert_eq!(data.first_cusp(), Some(0.0));
}

#[test]
fn test_load_chart_reports_every_problem() {
    let err = load_chart_data_from_json(r#"{"planets": {"Sun": "x"}, "cusps": [1, 2]}"#)
        .unwrap_err();
    match err {
        ChartDataError::Validation(status) => {
            assert!(status.has_error);
            assert_eq!(status.messages.len(), 2);
        }
        other => panic!("expected validation error, got {:?}", other),
    }

    assert!(matches!(
        load_chart_data_from_json("{not json"),
        Err(ChartDataError::InvalidJson(_))
    ));
}

#[test]
fn test_settings_from_toml() {
    let settings = ChartSettings::from_toml_str(
        r#"
        collision_radius = 4.5
        animation_cusps_rotation_speed = 2

        [[aspects]]
        name = "sextile"
        degree = 60.0
        orbit = 6.0
        "#,
    )
    .unwrap();

    assert_eq!(settings.collision_radius, 4.5);
    assert_eq!(settings.animation_cusps_rotation_speed, 2);
    assert_eq!(settings.aspects.len(), 1);
    assert_eq!(settings.aspects[0].color, "transparent");
    // Untouched fields keep their defaults
    assert_eq!(settings.shift_in_degrees, 180.0);

    assert!(ChartSettings::from_toml_str("collision_radius = 400.0").is_err());
}
