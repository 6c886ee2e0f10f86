//! Pascal VOC-style XML writer and reader.
//!
//! The document has a single `<annotation>` root with one `<object>` per box.
//! Corners are whole pixels against a fixed reference frame, like COCO
//! export. There is no `<filename>`/`<size>` block, DOCTYPE or namespace.

use std::fmt::Write as _;

use roxmltree::Node;

use super::classes::ClassList;
use super::model::{Annotation, AnnotationSet};
use super::{round_half_up, BBoxXYWH, FrameSize, Pixel};
use crate::error::LabelpadError;

const XML_DECLARATION: &str = "<?xml version=\"1.0\"?>";

/// Writes an annotation set as Pascal VOC-style XML.
///
/// Class ids outside `classes` are written as `class_<id>`.
pub fn to_voc_string(set: &AnnotationSet, classes: &ClassList, frame: FrameSize) -> String {
    let mut xml = String::new();

    writeln!(xml, "{XML_DECLARATION}").expect("write to string");
    writeln!(xml, "<annotation>").expect("write to string");

    for ann in set {
        let px = ann.bbox.to_pixel(frame);
        // Far corners scale the normalized far edge.
        let xmax = round_half_up(ann.bbox.xmax() * frame.width);
        let ymax = round_half_up(ann.bbox.ymax() * frame.height);
        let name = classes.name_or_placeholder(ann.class_id);

        writeln!(xml, "  <object>").expect("write to string");
        writeln!(xml, "    <name>{}</name>", xml_escape(&name)).expect("write to string");
        writeln!(xml, "    <bndbox>").expect("write to string");
        writeln!(xml, "      <xmin>{}</xmin>", round_half_up(px.x)).expect("write to string");
        writeln!(xml, "      <ymin>{}</ymin>", round_half_up(px.y)).expect("write to string");
        writeln!(xml, "      <xmax>{}</xmax>", xmax).expect("write to string");
        writeln!(xml, "      <ymax>{}</ymax>", ymax).expect("write to string");
        writeln!(xml, "    </bndbox>").expect("write to string");
        writeln!(xml, "  </object>").expect("write to string");
    }

    xml.push_str("</annotation>");
    xml
}

/// Reads Pascal VOC-style XML back into an annotation set.
///
/// Object names are resolved against `classes`; corners are divided by
/// `frame`. Extra elements (`<filename>`, `<size>`, `<pose>`, ...) are ignored.
pub fn from_voc_str(
    xml: &str,
    classes: &ClassList,
    frame: FrameSize,
) -> Result<AnnotationSet, LabelpadError> {
    let document = roxmltree::Document::parse(xml).map_err(|source| LabelpadError::VocXmlParse {
        message: source.to_string(),
    })?;

    let root = document.root_element();
    if root.tag_name().name() != "annotation" {
        return Err(LabelpadError::VocXmlParse {
            message: "missing <annotation> root element".to_string(),
        });
    }

    let mut annotations = Vec::new();
    for object in root
        .children()
        .filter(|node| node.is_element() && node.tag_name().name() == "object")
    {
        let name = required_child_text(object, "name", "<object>")?;
        let class_id = classes
            .id_of(&name)
            .ok_or_else(|| LabelpadError::UnknownClassName(name.clone()))?;

        let bndbox = required_child_element(object, "bndbox", "<object>")?;
        let xmin = parse_required_f64(bndbox, "xmin", "<bndbox>")?;
        let ymin = parse_required_f64(bndbox, "ymin", "<bndbox>")?;
        let xmax = parse_required_f64(bndbox, "xmax", "<bndbox>")?;
        let ymax = parse_required_f64(bndbox, "ymax", "<bndbox>")?;

        annotations.push(Annotation::new(
            class_id,
            BBoxXYWH::<Pixel>::from_xyxy(xmin, ymin, xmax, ymax).to_normalized(frame),
        ));
    }

    Ok(AnnotationSet::from(annotations))
}

/// Parses Pascal VOC-style XML from bytes, resolving names against the
/// default class list and reference frame.
///
/// This helper is primarily useful for fuzzing parse behavior in-memory.
pub fn from_voc_xml_slice(bytes: &[u8]) -> Result<AnnotationSet, LabelpadError> {
    let xml = std::str::from_utf8(bytes).map_err(|source| LabelpadError::VocXmlParse {
        message: format!("input is not valid UTF-8: {source}"),
    })?;
    from_voc_str(xml, &ClassList::default(), FrameSize::REFERENCE)
}

fn required_child_element<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &str,
    context: &str,
) -> Result<Node<'a, 'input>, LabelpadError> {
    child_element(node, tag).ok_or_else(|| LabelpadError::VocXmlParse {
        message: format!("missing <{tag}> in {context}"),
    })
}

fn required_child_text(node: Node<'_, '_>, tag: &str, context: &str) -> Result<String, LabelpadError> {
    child_element(node, tag)
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
        .ok_or_else(|| LabelpadError::VocXmlParse {
            message: format!("missing <{tag}> in {context}"),
        })
}

fn parse_required_f64(node: Node<'_, '_>, tag: &str, context: &str) -> Result<f64, LabelpadError> {
    let raw = required_child_text(node, tag, context)?;
    raw.parse::<f64>().map_err(|_| LabelpadError::VocXmlParse {
        message: format!(
            "invalid <{tag}> value '{raw}' in {context}; expected floating-point number"
        ),
    })
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && child.tag_name().name() == tag)
}

fn xml_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
