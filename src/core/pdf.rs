//! lopdf-backed drawing surface.
//!
//! Text is queued as content-stream operations and written to the page in one
//! go by [`PdfPageCanvas::finish`], which also registers a Helvetica font
//! resource. The page's existing content is wrapped in `q`/`Q` so the overlay
//! is drawn in default user space no matter what state the template leaves
//! behind.

use crate::domain::model::Rgb;
use crate::domain::ports::PageCanvas;
use crate::utils::error::{FillError, Result};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

const FONT_RESOURCE: &str = "FillHelv";
const MAX_TREE_DEPTH: usize = 32;

pub struct PdfPageCanvas<'a> {
    doc: &'a mut Document,
    page_id: ObjectId,
    operations: Vec<Operation>,
}

impl<'a> PdfPageCanvas<'a> {
    pub fn new(doc: &'a mut Document, page_id: ObjectId) -> Self {
        Self {
            doc,
            page_id,
            operations: Vec::new(),
        }
    }

    /// Write the queued text onto the page.
    pub fn finish(self) -> Result<()> {
        let Self {
            doc,
            page_id,
            operations,
        } = self;

        if operations.is_empty() {
            return Ok(());
        }

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        register_font(doc, page_id, font_id)?;

        let overlay = Content { operations }
            .encode()
            .map_err(FillError::rendering)?;
        append_isolated_contents(doc, page_id, overlay)
    }
}

impl PageCanvas for PdfPageCanvas<'_> {
    fn draw_text(&mut self, text: &str, x: f32, y: f32, font_size: f32, color: Rgb) -> Result<()> {
        self.operations.extend([
            Operation::new("BT", vec![]),
            Operation::new(
                "rg",
                vec![
                    Object::Real(color.r),
                    Object::Real(color.g),
                    Object::Real(color.b),
                ],
            ),
            Operation::new(
                "Tf",
                vec![
                    Object::Name(FONT_RESOURCE.as_bytes().to_vec()),
                    Object::Real(font_size),
                ],
            ),
            Operation::new("Td", vec![Object::Real(x), Object::Real(y)]),
            Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ]);
        Ok(())
    }
}

/// Encode text for a standard Type1 font with WinAnsiEncoding. Characters
/// the encoding cannot represent become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c as u32 as u8,
            _ => match c {
                '€' => 0x80,
                '‚' => 0x82,
                'ƒ' => 0x83,
                '„' => 0x84,
                '…' => 0x85,
                '‰' => 0x89,
                'Š' => 0x8A,
                '‹' => 0x8B,
                'Œ' => 0x8C,
                'Ž' => 0x8E,
                '‘' => 0x91,
                '’' => 0x92,
                '“' => 0x93,
                '”' => 0x94,
                '–' => 0x96,
                '—' => 0x97,
                '™' => 0x99,
                'š' => 0x9A,
                '›' => 0x9B,
                'œ' => 0x9C,
                'ž' => 0x9E,
                'Ÿ' => 0x9F,
                _ => b'?',
            },
        })
        .collect()
}

fn register_font(doc: &mut Document, page_id: ObjectId, font_id: ObjectId) -> Result<()> {
    // A page without its own resources inherits them from the page tree;
    // copy them down before adding ours so the template keeps its fonts.
    let has_own_resources = doc
        .get_dictionary(page_id)
        .map(|page| page.has(b"Resources"))
        .map_err(FillError::rendering)?;
    if !has_own_resources {
        if let Some(inherited) = inherited_resources(doc, page_id) {
            doc.get_object_mut(page_id)
                .and_then(Object::as_dict_mut)
                .map_err(FillError::rendering)?
                .set("Resources", inherited);
        }
    }

    let shared_fonts = {
        let resources = doc
            .get_or_create_resources(page_id)
            .and_then(Object::as_dict_mut)
            .map_err(FillError::rendering)?;
        let shared = resources.get(b"Font").and_then(Object::as_reference).ok();
        let inline = matches!(resources.get(b"Font"), Ok(Object::Dictionary(_)));
        if shared.is_none() && !inline {
            resources.set("Font", Dictionary::new());
        }
        shared
    };

    let fonts = match shared_fonts {
        Some(fonts_id) => doc.get_object_mut(fonts_id),
        None => doc
            .get_or_create_resources(page_id)
            .and_then(Object::as_dict_mut)
            .and_then(|resources| resources.get_mut(b"Font")),
    }
    .and_then(Object::as_dict_mut)
    .map_err(FillError::rendering)?;

    fonts.set(FONT_RESOURCE, Object::Reference(font_id));
    Ok(())
}

fn inherited_resources(doc: &Document, page_id: ObjectId) -> Option<Dictionary> {
    let mut node = doc.get_dictionary(page_id).ok()?;

    for _ in 0..MAX_TREE_DEPTH {
        let parent_id = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        let parent = doc.get_dictionary(parent_id).ok()?;
        match parent.get(b"Resources") {
            Ok(Object::Dictionary(resources)) => return Some(resources.clone()),
            Ok(Object::Reference(id)) => return doc.get_dictionary(*id).ok().cloned(),
            _ => node = parent,
        }
    }
    None
}

fn append_isolated_contents(doc: &mut Document, page_id: ObjectId, overlay: Vec<u8>) -> Result<()> {
    let existing: Vec<Object> = {
        let page = doc.get_dictionary(page_id).map_err(FillError::rendering)?;
        match page.get(b"Contents") {
            Ok(Object::Reference(id)) => match doc.get_object(*id) {
                Ok(Object::Array(items)) => items.clone(),
                _ => vec![Object::Reference(*id)],
            },
            Ok(Object::Array(items)) => items.clone(),
            _ => Vec::new(),
        }
    };

    let mut contents = Vec::with_capacity(existing.len() + 3);
    if !existing.is_empty() {
        let save = doc.add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
        let restore = doc.add_object(Stream::new(Dictionary::new(), b"\nQ\n".to_vec()));
        contents.push(Object::Reference(save));
        contents.extend(existing);
        contents.push(Object::Reference(restore));
    }
    contents.push(Object::Reference(
        doc.add_object(Stream::new(Dictionary::new(), overlay)),
    ));

    doc.get_object_mut(page_id)
        .and_then(Object::as_dict_mut)
        .map_err(FillError::rendering)?
        .set("Contents", contents);
    Ok(())
}
