//! Caption font lookup.
//!
//! The page caption is drawn with a system sans-serif face found via
//! fontdb. No font ships with the crate; when the host has no usable
//! face the caption is simply not drawn.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rusttype::Font;
use std::{fs, sync::OnceLock};

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        db
    })
}

/// The face used for the page caption, if the host has one.
pub fn caption_font() -> Option<&'static Font<'static>> {
    static FONT: OnceLock<Option<Font<'static>>> = OnceLock::new();
    FONT.get_or_init(load_sans_font).as_ref()
}

fn load_sans_font() -> Option<Font<'static>> {
    let families = [Family::SansSerif, Family::Serif, Family::Monospace];
    let query = Query {
        families: &families,
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };

    let id = db().query(&query)?;
    let face = db().face(id)?;

    match &face.source {
        fontdb::Source::File(path) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        fontdb::Source::SharedFile(path, _) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        fontdb::Source::Binary(bytes) => Font::try_from_vec(bytes.as_ref().as_ref().to_vec()),
    }
}
