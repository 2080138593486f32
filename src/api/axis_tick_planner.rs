use tracing::{debug, trace};

use crate::core::{Anchor, AxisScale, ScaleKind, TickOptions, TickValue};
use crate::error::{AxisError, AxisResult};
use crate::text::{FontSpec, TextMeasurer};

use super::AxisPanelConfig;

/// Sample used to measure the label line height.
pub const TEXT_HEIGHT_SAMPLE: &str = "m";

/// Relative length error accepted without further refinement.
const ACCEPTABLE_LENGTH_ERROR: f64 = 0.05;
const MIN_ITERATION_CAP: usize = 256;
const ITERATION_CAP_PER_SEED_TICK: usize = 8;

/// Candidate tick set evaluated by the parallel-axis search.
#[derive(Debug, Clone, PartialEq)]
pub struct TicksInfo {
    pub ticks: Vec<TickValue>,
    pub ticks_text: Vec<String>,
    pub max_text_width: Option<f64>,
    /// `|required - available| / available`; `None` until the candidate is measured.
    pub error: Option<f64>,
    pub exponent: Option<i32>,
    pub exponent_overflow: bool,
}

impl TicksInfo {
    fn error_exceeds(&self, error: f64) -> bool {
        self.error.is_some_and(|own| error > own)
    }
}

/// Ticks chosen for one layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct TickPlan {
    pub ticks: Vec<TickValue>,
    pub ticks_text: Vec<String>,
    /// Widest label at natural size.
    pub max_text_width: f64,
    pub text_height: f64,
    /// Scale tick requests issued while planning.
    pub iterations: usize,
    pub length_error: Option<f64>,
}

/// Chooses tick values and label text for one axis.
pub struct TickPlanner<'a> {
    scale: &'a dyn AxisScale,
    measurer: &'a dyn TextMeasurer,
    font: &'a FontSpec,
    anchor: Anchor,
    client_length: f64,
    desired_tick_count: Option<usize>,
    options: TickOptions,
    label_spacing_min: f64,
}

impl<'a> TickPlanner<'a> {
    #[must_use]
    pub fn new(
        scale: &'a dyn AxisScale,
        measurer: &'a dyn TextMeasurer,
        config: &'a AxisPanelConfig,
        client_length: f64,
    ) -> Self {
        Self {
            scale,
            measurer,
            font: &config.font,
            anchor: config.anchor(),
            client_length,
            desired_tick_count: config.desired_tick_count,
            options: config.tick_options(),
            label_spacing_min: config.label_spacing_min,
        }
    }

    pub fn plan(&self) -> AxisResult<TickPlan> {
        let text_height = self.measurer.measure_height(TEXT_HEIGHT_SAMPLE, self.font);

        let (info, iterations) = match self.scale.kind() {
            ScaleKind::Discrete => (self.discrete_ticks()?, 1),
            ScaleKind::Timeseries => (self.continuous_ticks(self.desired_tick_count)?, 1),
            ScaleKind::Continuous => self.number_ticks(text_height)?,
            ScaleKind::Unknown(name) => return Err(AxisError::UnsupportedScaleType(name)),
        };

        let max_text_width = info
            .max_text_width
            .unwrap_or_else(|| self.widest_label(&info.ticks_text));

        debug!(
            kind = %self.scale.kind(),
            ticks = info.ticks.len(),
            iterations,
            max_text_width,
            "axis ticks planned"
        );

        Ok(TickPlan {
            ticks: info.ticks,
            ticks_text: info.ticks_text,
            max_text_width,
            text_height,
            iterations,
            length_error: info.error,
        })
    }

    fn discrete_ticks(&self) -> AxisResult<TicksInfo> {
        let set = self.scale.ticks(None, self.options)?;
        Ok(self.with_text(set.values, set.exponent, set.exponent_overflow))
    }

    fn number_ticks(&self, text_height: f64) -> AxisResult<(TicksInfo, usize)> {
        match self.desired_tick_count {
            Some(desired) => Ok((self.continuous_ticks(Some(desired))?, 1)),
            None if self.anchor.is_top_or_bottom() => self.search_parallel_ticks(text_height),
            None => {
                let desired = self.orthogonal_tick_count(text_height);
                Ok((self.continuous_ticks(Some(desired))?, 1))
            }
        }
    }

    fn continuous_ticks(&self, desired: Option<usize>) -> AxisResult<TicksInfo> {
        let set = self.scale.ticks(desired, self.options)?;
        Ok(self.with_text(set.values, set.exponent, set.exponent_overflow))
    }

    fn with_text(
        &self,
        ticks: Vec<TickValue>,
        exponent: Option<i32>,
        exponent_overflow: bool,
    ) -> TicksInfo {
        let ticks_text = ticks
            .iter()
            .map(|tick| self.scale.tick_format(tick))
            .collect();
        TicksInfo {
            ticks,
            ticks_text,
            max_text_width: None,
            error: None,
            exponent,
            exponent_overflow,
        }
    }

    fn widest_label(&self, texts: &[String]) -> f64 {
        texts
            .iter()
            .map(|text| self.measurer.measure_width(text, self.font))
            .fold(0.0, f64::max)
    }

    /// Tick count for axes whose labels stack across the reading direction.
    #[must_use]
    pub fn orthogonal_tick_count(&self, text_height: f64) -> usize {
        let line_height = text_height * (1.0 + self.label_spacing_min.max(0.0));
        whole_count(self.client_length / line_height)
    }

    fn seed_tick_count(&self, text_height: f64, spacing: f64) -> usize {
        let Some((first, last)) = self.scale.domain() else {
            return 1;
        };
        let first_width = self
            .measurer
            .measure_width(&self.scale.tick_format(&first), self.font);
        let last_width = self
            .measurer
            .measure_width(&self.scale.tick_format(&last), self.font);
        let average = ((first_width + last_width) / 2.0).max(text_height);
        whole_count(self.client_length / (average + spacing))
    }

    /// Searches the tick count whose labels best fill the axis length.
    ///
    /// Moves the desired count one step at a time. Once a candidate overshoots
    /// the available length the search only goes down; once one undershoots
    /// by more than the tolerance it only goes up. Crossing back accepts the
    /// better of the two bracketing candidates.
    fn search_parallel_ticks(&self, text_height: f64) -> AxisResult<(TicksInfo, usize)> {
        let client_length = self.client_length;
        let spacing = text_height * (1.0 + self.label_spacing_min.max(0.0));
        let seed = self.seed_tick_count(text_height, spacing);
        let cap = MIN_ITERATION_CAP.max(seed.saturating_mul(ITERATION_CAP_PER_SEED_TICK));

        let mut desired = seed;
        let mut direction: i8 = 0;
        let mut previous_count = None;
        let mut last_below: Option<TicksInfo> = None;
        let mut last_above: Option<TicksInfo> = None;
        let mut iterations = 0;

        loop {
            iterations += 1;
            if iterations > cap {
                return Err(AxisError::TickSearchExhausted {
                    iterations: cap,
                    last_desired: desired,
                });
            }

            let mut info = self.continuous_ticks(Some(desired))?;
            let count = info.ticks.len();
            trace!(desired, count, direction, "tick search iteration");

            let mut unmeasured = None;
            if info.exponent_overflow {
                match direction {
                    0 => {
                        if info.exponent.is_some() && info.exponent == self.options.exponent_min {
                            last_below = Some(info);
                            direction = 1;
                        } else {
                            last_above = Some(info);
                            direction = -1;
                        }
                    }
                    1 => {
                        debug!(desired, "tick exponent overflow, keeping last fitting ticks");
                        return Ok((last_below.unwrap_or(info), iterations));
                    }
                    _ => {
                        debug!(desired, "tick exponent overflow, keeping last overflowing ticks");
                        return Ok((last_above.unwrap_or(info), iterations));
                    }
                }
            } else if previous_count != Some(count) {
                previous_count = Some(count);

                let length = self.labels_length(&mut info, spacing);
                let excess = length - client_length;
                let error = (excess / client_length).abs();
                info.error = Some(error);
                trace!(client_length, length, spacing, error, "tick search length");

                if excess > 0.0 {
                    if desired == 1 {
                        return Ok((info, iterations));
                    }
                    if let Some(below) = last_below {
                        let accepted = if error > ACCEPTABLE_LENGTH_ERROR
                            || below.error_exceeds(error)
                        {
                            below
                        } else {
                            info
                        };
                        return Ok((accepted, iterations));
                    }
                    last_above = Some(info);
                    direction = -1;
                } else {
                    if error <= ACCEPTABLE_LENGTH_ERROR || direction == -1 {
                        if let Some(above) = last_above
                            && above.error_exceeds(error)
                        {
                            return Ok((above, iterations));
                        }
                        return Ok((info, iterations));
                    }
                    last_below = Some(info);
                    direction = 1;
                }
            } else {
                unmeasured = Some(info);
            }

            if direction < 0 && desired <= 1 {
                // Nothing left below a single tick.
                let accepted = last_above.or(unmeasured).or(last_below);
                return accepted.map(|info| (info, iterations)).ok_or(
                    AxisError::TickSearchExhausted {
                        iterations,
                        last_desired: desired,
                    },
                );
            }
            desired = if direction < 0 { desired - 1 } else { desired + 1 };
        }
    }

    /// Length taken by the labels laid side by side: end labels count half
    /// their width, inner labels their full width, plus `spacing` between each pair.
    fn labels_length(&self, info: &mut TicksInfo, spacing: f64) -> f64 {
        let count = info.ticks_text.len();
        let mut length = 0.0;
        let mut widest: Option<f64> = None;
        for (index, text) in info.ticks_text.iter().enumerate() {
            let width = self.measurer.measure_width(text, self.font);
            widest = Some(widest.map_or(width, |current| current.max(width)));
            if index > 0 {
                length += spacing;
            }
            if index == 0 || index + 1 == count {
                length += width / 2.0;
            } else {
                length += width;
            }
        }
        info.max_text_width = widest;
        length
    }
}

fn whole_count(ratio: f64) -> usize {
    if ratio.is_finite() && ratio >= 1.0 {
        ratio.floor() as usize
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::core::{DiscreteScale, LinearScale, TickSet};
    use crate::text::HeuristicTextMeasurer;

    /// Every character is `char_width` wide, lines are `height` tall.
    struct FixedMeasurer {
        char_width: f64,
        height: f64,
    }

    impl TextMeasurer for FixedMeasurer {
        fn measure_width(&self, text: &str, _font: &FontSpec) -> f64 {
            text.chars().count() as f64 * self.char_width
        }

        fn measure_height(&self, _sample: &str, _font: &FontSpec) -> f64 {
            self.height
        }
    }

    struct OddScale;

    impl AxisScale for OddScale {
        fn kind(&self) -> ScaleKind {
            ScaleKind::from_name("Log")
        }

        fn domain(&self) -> Option<(TickValue, TickValue)> {
            None
        }

        fn ticks(&self, _desired: Option<usize>, _options: TickOptions) -> AxisResult<TickSet> {
            Ok(TickSet::default())
        }

        fn tick_format(&self, _tick: &TickValue) -> String {
            String::new()
        }

        fn map(&self, _tick: &TickValue) -> Option<f64> {
            None
        }

        fn map_number(&self, _value: f64) -> Option<f64> {
            None
        }

        fn range(&self) -> crate::core::ScaleRange {
            crate::core::ScaleRange::new(0.0, 0.0)
        }
    }

    /// Replays one tick set per request, repeating the last one when the
    /// script runs out.
    struct ScriptedScale {
        last_label: f64,
        script: Vec<TickSet>,
        requests: Cell<usize>,
    }

    impl ScriptedScale {
        fn new(last_label: f64, script: Vec<TickSet>) -> Self {
            Self {
                last_label,
                script,
                requests: Cell::new(0),
            }
        }
    }

    fn tick_set(values: &[f64], exponent: Option<i32>, exponent_overflow: bool) -> TickSet {
        TickSet {
            values: values.iter().copied().map(TickValue::Number).collect(),
            exponent,
            exponent_overflow,
        }
    }

    impl AxisScale for ScriptedScale {
        fn kind(&self) -> ScaleKind {
            ScaleKind::Continuous
        }

        fn domain(&self) -> Option<(TickValue, TickValue)> {
            Some((TickValue::Number(0.0), TickValue::Number(self.last_label)))
        }

        fn ticks(&self, _desired: Option<usize>, _options: TickOptions) -> AxisResult<TickSet> {
            let request = self.requests.get();
            self.requests.set(request + 1);
            let index = request.min(self.script.len().saturating_sub(1));
            Ok(self.script.get(index).cloned().unwrap_or_default())
        }

        fn tick_format(&self, tick: &TickValue) -> String {
            tick.as_number().map(|value| value.to_string()).unwrap_or_default()
        }

        fn map(&self, _tick: &TickValue) -> Option<f64> {
            None
        }

        fn map_number(&self, _value: f64) -> Option<f64> {
            None
        }

        fn range(&self) -> crate::core::ScaleRange {
            crate::core::ScaleRange::new(0.0, 300.0)
        }
    }

    // Ten pixels per character and per line, so the label gap is 20 px.
    fn square_measurer() -> FixedMeasurer {
        FixedMeasurer {
            char_width: 10.0,
            height: 10.0,
        }
    }

    #[test]
    fn overflow_at_the_minimum_exponent_keeps_the_first_ticks() {
        let scale = LinearScale::new(0.0, 2.0).expect("scale");
        let measurer = square_measurer();
        let config = AxisPanelConfig::x_axis().with_tick_exponents(Some(0), None);
        let plan = TickPlanner::new(&scale, &measurer, &config, 400.0)
            .plan()
            .expect("plan");
        assert_eq!(plan.ticks_text, vec!["0", "1", "2"]);
        assert_eq!(plan.iterations, 2);
        assert_eq!(plan.length_error, None);
    }

    #[test]
    fn overflow_away_from_the_minimum_keeps_the_overflowing_ticks() {
        let scale = ScriptedScale::new(
            9.0,
            vec![
                tick_set(&[0.0, 1000.0], Some(3), true),
                tick_set(&[0.0, 500.0, 1000.0], Some(2), true),
            ],
        );
        let measurer = square_measurer();
        let config = AxisPanelConfig::x_axis();
        let plan = TickPlanner::new(&scale, &measurer, &config, 300.0)
            .plan()
            .expect("plan");
        assert_eq!(plan.ticks_text, vec!["0", "1000"]);
        assert_eq!(plan.iterations, 2);
        assert_eq!(plan.length_error, None);
    }

    #[test]
    fn overflow_while_growing_keeps_the_last_short_candidate() {
        // "0" and "9" take 5 + 20 + 5 = 30 of 300 px.
        let scale = ScriptedScale::new(
            9.0,
            vec![
                tick_set(&[0.0, 9.0], Some(0), false),
                tick_set(&[0.0, 3.0, 6.0, 9.0], Some(-1), true),
            ],
        );
        let measurer = square_measurer();
        let config = AxisPanelConfig::x_axis();
        let plan = TickPlanner::new(&scale, &measurer, &config, 300.0)
            .plan()
            .expect("plan");
        assert_eq!(plan.ticks_text, vec!["0", "9"]);
        assert_eq!(plan.iterations, 2);
        let error = plan.length_error.expect("measured");
        assert!((error - 0.9).abs() < 1e-12);
    }

    #[test]
    fn shrinking_to_one_tick_falls_back_to_the_overshooting_candidate() {
        // Seed is 60 / (10 + 20) = 2; five labels need 120 px.
        let five = [0.0, 1.0, 2.0, 3.0, 4.0];
        let scale = ScriptedScale::new(
            4.0,
            vec![
                tick_set(&five, Some(0), false),
                tick_set(&[4.0, 3.0, 2.0, 1.0, 0.0], Some(0), false),
            ],
        );
        let measurer = square_measurer();
        let config = AxisPanelConfig::x_axis();
        let plan = TickPlanner::new(&scale, &measurer, &config, 60.0)
            .plan()
            .expect("plan");
        assert_eq!(plan.ticks_text, vec!["0", "1", "2", "3", "4"]);
        assert_eq!(plan.iterations, 2);
        let error = plan.length_error.expect("measured");
        assert!((error - 1.0).abs() < 1e-12);
    }

    #[test]
    fn search_that_never_changes_count_is_exhausted() {
        let scale = ScriptedScale::new(9.0, vec![tick_set(&[0.0, 9.0], Some(0), false)]);
        let measurer = square_measurer();
        let config = AxisPanelConfig::x_axis();
        let err = TickPlanner::new(&scale, &measurer, &config, 300.0)
            .plan()
            .expect_err("count never changes");
        // Seed 300 / 30 = 10, so the cap is the 256 floor.
        assert!(matches!(
            err,
            AxisError::TickSearchExhausted {
                iterations: 256,
                last_desired: 266,
            }
        ));
        assert_eq!(scale.requests.get(), 256);
    }

    #[test]
    fn vertical_axis_count_comes_from_line_height() {
        let scale = LinearScale::new(0.0, 100.0)
            .and_then(|scale| scale.with_range(0.0, 200.0))
            .expect("scale");
        let measurer = FixedMeasurer {
            char_width: 5.0,
            height: 10.0,
        };
        let config = AxisPanelConfig::y_axis();
        let planner = TickPlanner::new(&scale, &measurer, &config, 200.0);
        // 200 / (10 * 2) = 10
        assert_eq!(planner.orthogonal_tick_count(10.0), 10);
        let plan = planner.plan().expect("plan");
        assert_eq!(plan.iterations, 1);
        assert_eq!(plan.ticks_text.len(), plan.ticks.len());
        assert_eq!(plan.ticks_text.first().map(String::as_str), Some("0"));
        assert_eq!(plan.ticks_text.last().map(String::as_str), Some("100"));
    }

    #[test]
    fn fixed_desired_count_skips_the_search() {
        let scale = LinearScale::new(0.0, 1000.0).expect("scale");
        let measurer = HeuristicTextMeasurer::new();
        let config = AxisPanelConfig::x_axis().with_desired_tick_count(Some(5));
        let plan = TickPlanner::new(&scale, &measurer, &config, 400.0)
            .plan()
            .expect("plan");
        assert_eq!(plan.iterations, 1);
        assert_eq!(plan.ticks.len(), 6);
        assert!(plan.length_error.is_none());
    }

    #[test]
    fn horizontal_search_brackets_the_available_length() {
        // Labels are 7.5 px per char, spacing 5 * 2 = 10 px.
        let scale = LinearScale::new(0.0, 1000.0).expect("scale");
        let measurer = FixedMeasurer {
            char_width: 7.5,
            height: 5.0,
        };
        let config = AxisPanelConfig::x_axis();
        let plan = TickPlanner::new(&scale, &measurer, &config, 400.0)
            .plan()
            .expect("plan");
        assert_eq!(plan.ticks.len(), 11);
        assert_eq!(plan.ticks_text[1], "100");
        assert!(plan.iterations <= 15);
        assert_eq!(plan.max_text_width, 30.0);
    }

    #[test]
    fn one_pixel_axis_settles_on_a_single_tick_request() {
        let scale = LinearScale::new(0.0, 1000.0).expect("scale");
        let measurer = HeuristicTextMeasurer::new();
        let config = AxisPanelConfig::x_axis();
        let plan = TickPlanner::new(&scale, &measurer, &config, 1.0)
            .plan()
            .expect("plan");
        assert!(!plan.ticks.is_empty());
        assert!(plan.iterations <= 2);
    }

    #[test]
    fn discrete_ticks_use_absolute_labels() {
        let scale = DiscreteScale::from_values(["north", "south"]);
        let measurer = FixedMeasurer {
            char_width: 6.0,
            height: 10.0,
        };
        let config = AxisPanelConfig::x_axis();
        let plan = TickPlanner::new(&scale, &measurer, &config, 300.0)
            .plan()
            .expect("plan");
        assert_eq!(plan.ticks_text, vec!["north", "south"]);
        assert_eq!(plan.max_text_width, 30.0);
    }

    #[test]
    fn unknown_scale_kind_is_rejected() {
        let measurer = HeuristicTextMeasurer::new();
        let config = AxisPanelConfig::x_axis();
        let err = TickPlanner::new(&OddScale, &measurer, &config, 100.0)
            .plan()
            .expect_err("unsupported scale");
        assert!(matches!(err, AxisError::UnsupportedScaleType(name) if name == "Log"));
    }
}
