use chart_axis::AxisError;
use chart_axis::api::{AxisPanelConfig, TickPlanner};
use chart_axis::core::{
    AxisScale, DiscreteScale, LinearScale, ScaleKind, ScaleRange, TickOptions, TickSet, TickValue,
    TimeSeriesScale,
};
use chart_axis::text::{FontSpec, HeuristicTextMeasurer, TextMeasurer};

#[test]
fn horizontal_search_settles_within_fifteen_iterations() {
    let scale = LinearScale::new(0.0, 1_000.0)
        .and_then(|scale| scale.with_range(0.0, 800.0))
        .expect("scale");
    let measurer = HeuristicTextMeasurer::new();
    let config = AxisPanelConfig::x_axis();

    let plan = TickPlanner::new(&scale, &measurer, &config, 800.0)
        .plan()
        .expect("plan");

    assert!(plan.iterations <= 15, "took {} iterations", plan.iterations);
    assert!(plan.ticks.len() >= 2);
    assert_eq!(plan.ticks.len(), plan.ticks_text.len());
    assert!(plan.max_text_width > 0.0);
}

#[test]
fn one_pixel_axis_keeps_a_single_tick_search_short() {
    let scale = LinearScale::new(0.0, 10.0)
        .and_then(|scale| scale.with_range(0.0, 1.0))
        .expect("scale");
    let measurer = HeuristicTextMeasurer::new();
    let config = AxisPanelConfig::x_axis();

    let plan = TickPlanner::new(&scale, &measurer, &config, 1.0)
        .plan()
        .expect("plan");

    assert!(plan.iterations <= 2);
    assert!(!plan.ticks.is_empty());
}

#[test]
fn vertical_axis_count_follows_line_height() {
    let scale = LinearScale::new(0.0, 100.0)
        .and_then(|scale| scale.with_range(0.0, 360.0))
        .expect("scale");
    let measurer = HeuristicTextMeasurer::new();
    let config = AxisPanelConfig::y_axis();
    let planner = TickPlanner::new(&scale, &measurer, &config, 360.0);

    // 9 px labels with one em of spacing need 18 px each.
    assert_eq!(planner.orthogonal_tick_count(9.0), 20);
    let plan = planner.plan().expect("plan");
    assert_eq!(plan.iterations, 1);
    assert_eq!(plan.text_height, 9.0);
}

#[test]
fn capped_tick_exponent_keeps_the_count_bounded() {
    let scale = LinearScale::new(0.0, 1_000_000.0)
        .and_then(|scale| scale.with_range(0.0, 200.0))
        .expect("scale");
    let measurer = HeuristicTextMeasurer::new();
    let config = AxisPanelConfig::y_axis().with_tick_exponents(None, Some(0));
    let planner = TickPlanner::new(&scale, &measurer, &config, 200.0);

    let desired = planner.orthogonal_tick_count(9.0);
    assert_eq!(desired, 11);
    let plan = planner.plan().expect("plan");
    assert!(plan.ticks.len() <= 4 * desired + 1, "{} ticks", plan.ticks.len());
    assert_eq!(plan.ticks.len(), 11);
    assert_eq!(plan.ticks_text.first().map(String::as_str), Some("0"));
    assert_eq!(plan.ticks_text.last().map(String::as_str), Some("1000000"));
}

#[test]
fn time_series_ticks_take_a_single_request() {
    let scale = TimeSeriesScale::from_unix_seconds(1_700_000_000, 1_700_086_400)
        .and_then(|scale| scale.with_range(0.0, 600.0))
        .expect("scale");
    let measurer = HeuristicTextMeasurer::new();
    let config = AxisPanelConfig::x_axis().with_desired_tick_count(Some(6));

    let plan = TickPlanner::new(&scale, &measurer, &config, 600.0)
        .plan()
        .expect("plan");

    assert_eq!(plan.iterations, 1);
    assert!(plan.ticks.iter().all(|tick| matches!(tick, TickValue::Time(_))));
    assert!(plan.ticks_text.iter().all(|text| text.contains(':')));
}

#[test]
fn discrete_ticks_are_the_categories() {
    let scale = DiscreteScale::from_values(["north", "south", "east", "west"])
        .with_range(0.0, 400.0)
        .expect("scale");
    let measurer = HeuristicTextMeasurer::new();
    let config = AxisPanelConfig::x_axis();

    let plan = TickPlanner::new(&scale, &measurer, &config, 400.0)
        .plan()
        .expect("plan");

    assert_eq!(plan.ticks_text, vec!["north", "south", "east", "west"]);
    let font = FontSpec::default();
    assert_eq!(
        plan.max_text_width,
        measurer
            .measure_width("north", &font)
            .max(measurer.measure_width("south", &font))
    );
}

struct LogScale;

impl AxisScale for LogScale {
    fn kind(&self) -> ScaleKind {
        ScaleKind::from_name("log")
    }

    fn domain(&self) -> Option<(TickValue, TickValue)> {
        Some((TickValue::Number(1.0), TickValue::Number(1_000.0)))
    }

    fn ticks(
        &self,
        _desired: Option<usize>,
        _options: TickOptions,
    ) -> chart_axis::AxisResult<TickSet> {
        Ok(TickSet::new(vec![TickValue::Number(1.0)]))
    }

    fn tick_format(&self, _tick: &TickValue) -> String {
        "1".to_owned()
    }

    fn map(&self, _tick: &TickValue) -> Option<f64> {
        Some(0.0)
    }

    fn map_number(&self, _value: f64) -> Option<f64> {
        Some(0.0)
    }

    fn range(&self) -> ScaleRange {
        ScaleRange::new(0.0, 100.0)
    }
}

#[test]
fn unknown_scale_kinds_are_rejected() {
    let measurer = HeuristicTextMeasurer::new();
    let config = AxisPanelConfig::x_axis();
    let err = TickPlanner::new(&LogScale, &measurer, &config, 100.0)
        .plan()
        .expect_err("log scales are not supported");
    assert!(matches!(err, AxisError::UnsupportedScaleType(name) if name == "log"));
}
