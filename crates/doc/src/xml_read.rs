//! Reads the label template XML dialect into an arena [`Document`].

use crate::arena::{Document, NodeId};
use crate::error::DocError;
use crate::node::{CellProps, GridProps, ImageData, NodeKind, RowProps, TableProps, VerticalAlign};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use labelgrid_style::{Border, FontStyle, FontWeight, ParagraphStyle, RunStyle, TabStop, TextAlign};
use labelgrid_types::{Color, Length, ResourceUri};
use roxmltree::Node as XmlNode;
use std::str::FromStr;
use std::sync::Arc;

impl Document {
    /// Parses a document from the template XML dialect.
    ///
    /// The root element must be `<document>`. Whitespace-only text between
    /// structural elements is ignored; text inside `<t>` is kept verbatim.
    pub fn from_xml(source: &str) -> Result<Document, DocError> {
        let xml = roxmltree::Document::parse(source)?;
        let root_el = xml.root_element();
        if root_el.tag_name().name() != "document" {
            return Err(DocError::Structure(format!(
                "expected <document> root element, found <{}>",
                root_el.tag_name().name()
            )));
        }

        let mut doc = Document::new();
        let root = doc.root();
        read_children(&mut doc, root, root_el)?;
        Ok(doc)
    }
}

fn read_children(doc: &mut Document, parent: NodeId, el: XmlNode) -> Result<(), DocError> {
    let parent_is_paragraph = doc.kind(parent).is_some_and(NodeKind::is_paragraph);
    let parent_is_run = matches!(doc.kind(parent), Some(NodeKind::Run(_)));

    for child in el.children() {
        if child.is_element() {
            read_element(doc, parent, child)?;
        } else if child.is_text() {
            let text = child.text().unwrap_or("");
            if text.trim().is_empty() {
                continue;
            }
            if parent_is_run {
                doc.append(parent, NodeKind::Text(text.to_string()))?;
            } else if parent_is_paragraph {
                // Bare text in a paragraph gets an implicit, unstyled run.
                let run = doc.append(parent, NodeKind::Run(RunStyle::default()))?;
                doc.append(run, NodeKind::Text(text.to_string()))?;
            } else {
                return Err(DocError::Structure(format!(
                    "unexpected text '{}' inside <{}>",
                    text.trim(),
                    el.tag_name().name()
                )));
            }
        }
    }
    Ok(())
}

fn read_element(doc: &mut Document, parent: NodeId, el: XmlNode) -> Result<(), DocError> {
    let name = el.tag_name().name();
    let kind = match name {
        "page" => NodeKind::Page {
            index: parse_attr::<usize>(el, "index")?.unwrap_or(0),
        },
        "table" => NodeKind::Table(TableProps {
            style_name: el.attribute("style").map(str::to_string),
            width: length_attr(el, "width")?,
            borders: parse_attr::<Border>(el, "border")?,
            cell_margin: length_attr(el, "cell-margin")?,
        }),
        "grid" => {
            let mut columns = Vec::new();
            for col in el.children().filter(|c| c.is_element()) {
                if col.tag_name().name() != "col" {
                    return Err(DocError::UnknownElement(format!("grid/{}", col.tag_name().name())));
                }
                columns.push(length_attr(col, "width")?.unwrap_or(0.0));
            }
            doc.append(parent, NodeKind::Grid(GridProps { columns }))?;
            return Ok(());
        }
        "row" => NodeKind::Row(RowProps {
            height: length_attr(el, "height")?,
        }),
        "cell" => NodeKind::Cell(CellProps {
            width: length_attr(el, "width")?,
            shading: color_attr(el, "shading")?,
            borders: parse_attr::<Border>(el, "border")?,
            v_align: match el.attribute("valign") {
                None => None,
                Some("top") => Some(VerticalAlign::Top),
                Some("center") => Some(VerticalAlign::Center),
                Some("bottom") => Some(VerticalAlign::Bottom),
                Some(other) => return Err(invalid(el, "valign", other)),
            },
        }),
        "p" => NodeKind::Paragraph(ParagraphStyle {
            align: parse_attr::<TextAlign>(el, "align")?,
            line_spacing: parse_attr::<f32>(el, "line-spacing")?,
            space_after: length_attr(el, "space-after")?,
            tab_stops: tab_stops_attr(el)?,
        }),
        "r" => NodeKind::Run(run_style(el)?),
        "t" => {
            let text: String = el.children().filter_map(|c| c.text()).collect();
            doc.append(parent, NodeKind::Text(text))?;
            return Ok(());
        }
        "br" => NodeKind::Break,
        "tab" => NodeKind::Tab,
        "page-break" => NodeKind::PageBreak,
        "img" => NodeKind::Image(image_data(el)?),
        other => return Err(DocError::UnknownElement(other.to_string())),
    };

    let id = doc.append(parent, kind)?;
    read_children(doc, id, el)
}

fn run_style(el: XmlNode) -> Result<RunStyle, DocError> {
    let weight = match (el.attribute("weight"), el.attribute("bold")) {
        (Some(w), _) => Some(FontWeight::parse(w).map_err(|_| invalid(el, "weight", w))?),
        (None, Some(b)) => Some(FontWeight::parse(b).map_err(|_| invalid(el, "bold", b))?),
        (None, None) => None,
    };
    let style = match el.attribute("italic") {
        None => None,
        Some("true") | Some("1") => Some(FontStyle::Italic),
        Some("false") | Some("0") => Some(FontStyle::Normal),
        Some(other) => return Err(invalid(el, "italic", other)),
    };
    Ok(RunStyle {
        font_family: el.attribute("font").map(str::to_string),
        font_size: length_attr(el, "size")?,
        weight,
        style,
        color: color_attr(el, "color")?,
    })
}

fn image_data(el: XmlNode) -> Result<ImageData, DocError> {
    let data = match el.attribute("data") {
        Some(encoded) => Some(Arc::new(
            STANDARD
                .decode(encoded.trim())
                .map_err(|e| DocError::InvalidImageData(e.to_string()))?,
        )),
        None => None,
    };
    Ok(ImageData {
        src: el.attribute("src").map(ResourceUri::from),
        data,
        content_type: el.attribute("type").map(str::to_string),
        width: length_attr(el, "width")?.unwrap_or(0.0),
        height: length_attr(el, "height")?.unwrap_or(0.0),
        alt: el.attribute("alt").map(str::to_string),
    })
}

/// Parses `tabs="right:216pt left:0.5in"`.
fn tab_stops_attr(el: XmlNode) -> Result<Vec<TabStop>, DocError> {
    let Some(raw) = el.attribute("tabs") else {
        return Ok(Vec::new());
    };
    raw.split_whitespace()
        .map(|spec| {
            let (align, pos) = spec.split_once(':').ok_or_else(|| invalid(el, "tabs", raw))?;
            let align = TextAlign::from_str(align).map_err(|_| invalid(el, "tabs", raw))?;
            let position = Length::from_str(pos).map_err(|_| invalid(el, "tabs", raw))?.points();
            Ok(TabStop { position, align })
        })
        .collect()
}

fn parse_attr<T: FromStr>(el: XmlNode, attr: &str) -> Result<Option<T>, DocError> {
    match el.attribute(attr) {
        None => Ok(None),
        Some(v) => v.trim().parse::<T>().map(Some).map_err(|_| invalid(el, attr, v)),
    }
}

fn length_attr(el: XmlNode, attr: &str) -> Result<Option<f32>, DocError> {
    Ok(parse_attr::<Length>(el, attr)?.map(Length::points))
}

fn color_attr(el: XmlNode, attr: &str) -> Result<Option<Color>, DocError> {
    match el.attribute(attr) {
        None => Ok(None),
        Some(v) => Color::parse_hex(v).map(Some).map_err(|_| invalid(el, attr, v)),
    }
}

fn invalid(el: XmlNode, attribute: &str, value: &str) -> DocError {
    DocError::InvalidAttribute {
        element: el.tag_name().name().to_string(),
        attribute: attribute.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"<?xml version="1.0"?>
<document>
  <table style="LabelGrid" width="9.9in" border="single 0.5 #000000">
    <grid><col width="3.3in"/></grid>
    <row height="2.4in">
      <cell width="3.3in" shading="#F2F2F2" valign="center">
        <p align="center" tabs="right:3in"><r size="14" weight="bold"><t>{{Label1.ProductBrand}}</t></r></p>
        <p><r italic="true" color="#A6A6A6"><t xml:space="preserve">  spaced  </t><br/><tab/></r></p>
      </cell>
    </row>
  </table>
</document>"##;

    #[test]
    fn test_reads_structure_and_properties() {
        let doc = Document::from_xml(SAMPLE).unwrap();
        let root = doc.root();

        let table = doc.find_first(root, NodeKind::is_table).unwrap();
        match doc.kind(table) {
            Some(NodeKind::Table(props)) => {
                assert_eq!(props.style_name.as_deref(), Some("LabelGrid"));
                assert!((props.width.unwrap() - 712.8).abs() < 0.01);
                assert!(props.borders.is_some());
            }
            other => panic!("expected table, got {:?}", other),
        }

        let grid = doc.find_first(root, NodeKind::is_grid).unwrap();
        assert!(matches!(doc.kind(grid), Some(NodeKind::Grid(g)) if g.columns.len() == 1));

        let cell = doc.find_first(root, NodeKind::is_cell).unwrap();
        match doc.kind(cell) {
            Some(NodeKind::Cell(props)) => {
                assert_eq!(props.shading, Some(Color::gray(0xF2)));
                assert_eq!(props.v_align, Some(VerticalAlign::Center));
            }
            other => panic!("expected cell, got {:?}", other),
        }

        let paragraphs = doc.find_all(root, NodeKind::is_paragraph);
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(doc.text_content(paragraphs[0]), "{{Label1.ProductBrand}}");
        assert_eq!(doc.text_content(paragraphs[1]), "  spaced  \n\t");
    }

    #[test]
    fn test_rejects_unknown_elements_and_bad_attributes() {
        assert!(matches!(
            Document::from_xml("<document><blink/></document>"),
            Err(DocError::UnknownElement(_))
        ));
        assert!(matches!(
            Document::from_xml(r#"<document><p align="sideways"/></document>"#),
            Err(DocError::InvalidAttribute { .. })
        ));
        assert!(Document::from_xml("<sheet/>").is_err());
        assert!(Document::from_xml("<document>").is_err());
    }

    #[test]
    fn test_bare_paragraph_text_gets_a_run() {
        let doc = Document::from_xml("<document><p>hello</p></document>").unwrap();
        let run = doc.find_first(doc.root(), |k| matches!(k, NodeKind::Run(_)));
        assert!(run.is_some());
        assert_eq!(doc.text_content(doc.root()), "hello");
    }
}
