//! Format encoder: one operation over the three export formats.
//!
//! Encoding is pure. The same set, format and config always give the same
//! text, and encoding never fails; an empty set yields the YOLO placeholder
//! or an empty but well-formed COCO/Pascal document.

use std::fmt;
use std::str::FromStr;

use crate::config::PlaygroundConfig;
use crate::error::LabelpadError;
use crate::ir::{io_coco_json, io_voc_xml, io_yolo, AnnotationSet};

/// Export format tag, as selected by the output tabs.
///
/// This mirrors the CLI's format argument but is decoupled from clap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Normalized center-based rows.
    #[default]
    Yolo,
    /// Top-left + size in reference-frame pixels, as JSON.
    Coco,
    /// Corner pairs in reference-frame pixels, as XML.
    Pascal,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Yolo, ExportFormat::Coco, ExportFormat::Pascal];

    /// Human-readable name for the format.
    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Yolo => "yolo",
            ExportFormat::Coco => "coco",
            ExportFormat::Pascal => "pascal",
        }
    }

    /// Renders `set` in this format.
    pub fn encode(&self, set: &AnnotationSet, config: &PlaygroundConfig) -> String {
        match self {
            ExportFormat::Yolo => io_yolo::to_yolo_string(set),
            ExportFormat::Coco => io_coco_json::to_coco_string(set, config.frame),
            ExportFormat::Pascal => io_voc_xml::to_voc_string(set, &config.classes, config.frame),
        }
    }

    /// Parses text in this format back into an annotation set.
    pub fn decode(&self, text: &str, config: &PlaygroundConfig) -> Result<AnnotationSet, LabelpadError> {
        match self {
            ExportFormat::Yolo => io_yolo::from_yolo_str(text),
            ExportFormat::Coco => io_coco_json::from_coco_str(text, config.frame),
            ExportFormat::Pascal => io_voc_xml::from_voc_str(text, &config.classes, config.frame),
        }
    }

    /// Largest per-axis error (in normalized units) a decode of an encode
    /// can introduce for a box inside the frame.
    ///
    /// - `Yolo`: six decimals per field, recombined from the center.
    /// - `Coco` / `Pascal`: whole-pixel rounding in the reference frame.
    pub fn roundtrip_tolerance(&self, config: &PlaygroundConfig) -> f64 {
        match self {
            ExportFormat::Yolo => 1e-6,
            ExportFormat::Coco | ExportFormat::Pascal => {
                1.0 / config.frame.width.min(config.frame.height)
            }
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportFormat {
    type Err = LabelpadError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "yolo" => Ok(ExportFormat::Yolo),
            "coco" | "coco-json" => Ok(ExportFormat::Coco),
            "pascal" | "voc" | "pascal-voc" => Ok(ExportFormat::Pascal),
            other => Err(LabelpadError::UnsupportedFormat(format!(
                "'{}' (supported: yolo, coco, pascal)",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Annotation, BBoxXYWH};

    fn scenario_set() -> AnnotationSet {
        vec![Annotation::new(0usize, BBoxXYWH::from_xywh(0.1, 0.2, 0.3, 0.4))].into()
    }

    #[test]
    fn encoding_is_deterministic_for_every_format() {
        let config = PlaygroundConfig::default();
        let set = scenario_set();
        for format in ExportFormat::ALL {
            assert_eq!(format.encode(&set, &config), format.encode(&set, &config));
        }
    }

    #[test]
    fn every_format_decodes_its_own_output() {
        let config = PlaygroundConfig::default();
        let set = scenario_set();
        for format in ExportFormat::ALL {
            let restored = format
                .decode(&format.encode(&set, &config), &config)
                .expect("decode own output");
            assert_eq!(restored.len(), 1, "{format}");
            let tol = format.roundtrip_tolerance(&config);
            let (a, b) = (set.annotations[0].bbox, restored.annotations[0].bbox);
            assert!((a.x - b.x).abs() <= tol, "{format}: x {} vs {}", a.x, b.x);
            assert!((a.w - b.w).abs() <= tol, "{format}: w {} vs {}", a.w, b.w);
        }
    }

    #[test]
    fn empty_set_output_is_never_empty() {
        let config = PlaygroundConfig::default();
        for format in ExportFormat::ALL {
            assert!(!format.encode(&AnnotationSet::new(), &config).is_empty());
        }
    }

    #[test]
    fn parses_format_names_and_aliases() {
        assert_eq!("YOLO".parse::<ExportFormat>().unwrap(), ExportFormat::Yolo);
        assert_eq!("coco-json".parse::<ExportFormat>().unwrap(), ExportFormat::Coco);
        assert_eq!("voc".parse::<ExportFormat>().unwrap(), ExportFormat::Pascal);
        assert!(matches!(
            "csv".parse::<ExportFormat>(),
            Err(LabelpadError::UnsupportedFormat(_))
        ));
    }
}
