use render::{LegendStrip, Rgb, Swatch};
use scene::Metric;

use crate::symbology::DivergingScale;

pub const NO_DATA_LABEL: &str = "No Data Available";
pub const NO_DATA_LABEL_COMPACT: &str = "N/A";

pub fn caption(metric: Metric) -> String {
    format!(
        "Percent increase or decrease in travel to {} locations",
        metric.noun()
    )
}

/// Color key for the selected metric.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    caption: String,
    swatches: Vec<Swatch>,
    no_data_label: &'static str,
    no_data_fill: Rgb,
}

impl Legend {
    pub fn generate(scale: &DivergingScale, metric: Metric, no_data_fill: Rgb, compact: bool) -> Self {
        let swatches = scale
            .legend_values()
            .into_iter()
            .filter_map(|value| scale.color(value).map(|fill| Swatch { value, fill }))
            .collect();
        Self {
            caption: caption(metric),
            swatches,
            no_data_label: if compact {
                NO_DATA_LABEL_COMPACT
            } else {
                NO_DATA_LABEL
            },
            no_data_fill,
        }
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.swatches.iter().map(|s| s.value)
    }

    pub fn no_data_label(&self) -> &str {
        self.no_data_label
    }

    pub fn strip(&self) -> LegendStrip<'_> {
        LegendStrip {
            caption: &self.caption,
            swatches: &self.swatches,
            no_data_label: self.no_data_label,
            no_data_fill: self.no_data_fill,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Legend, NO_DATA_LABEL_COMPACT};
    use crate::symbology::DivergingScale;
    use pretty_assertions::assert_eq;
    use render::Rgb;
    use scene::Metric;

    const NO_DATA: Rgb = Rgb::new(223, 226, 232);

    #[test]
    fn order_is_identical_for_every_metric() {
        let scale = DivergingScale::default();
        for metric in Metric::ALL {
            let legend = Legend::generate(&scale, metric, NO_DATA, false);
            assert_eq!(
                legend.values().collect::<Vec<_>>(),
                vec![100.0, 75.0, 50.0, 25.0, 0.0, -25.0, -50.0, -75.0, -100.0]
            );
        }
    }

    #[test]
    fn swatches_use_the_scale() {
        let scale = DivergingScale::default();
        let legend = Legend::generate(&scale, Metric::Parks, NO_DATA, false);
        for swatch in legend.swatches() {
            assert_eq!(Some(swatch.fill), scale.color(swatch.value));
        }
        assert_eq!(legend.swatches()[4].fill, scale.neutral());
    }

    #[test]
    fn caption_names_the_metric() {
        let scale = DivergingScale::default();
        let legend = Legend::generate(&scale, Metric::Workplaces, NO_DATA, false);
        assert_eq!(
            legend.caption(),
            "Percent increase or decrease in travel to workplace locations"
        );
        assert_eq!(legend.no_data_label(), "No Data Available");

        let compact = Legend::generate(&scale, Metric::Workplaces, NO_DATA, true);
        assert_eq!(compact.no_data_label(), NO_DATA_LABEL_COMPACT);
        assert_eq!(compact.strip().no_data_fill, NO_DATA);
    }
}
