use std::fmt;

/// Metadata categories that get a placeholder when missing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Artist,
    Genre,
    Album,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Artist => "artist",
            Self::Genre => "genre",
            Self::Album => "album",
        })
    }
}

/// Resolves the localized "unknown ..." string for a category.
pub trait Placeholders: Send + Sync {
    fn placeholder_for(&self, category: Category, locale: &str) -> String;
}

/// Placeholder table compiled into the crate. Unknown languages use English.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinPlaceholders;

// (language, artist, genre, album)
const TABLE: &[(&str, &str, &str, &str)] = &[
    ("en", "Unknown Artist", "Unknown Genre", "Unknown Album"),
    ("fr", "Artiste inconnu", "Genre inconnu", "Album inconnu"),
    ("de", "Unbekannter Künstler", "Unbekanntes Genre", "Unbekanntes Album"),
    ("es", "Artista desconocido", "Género desconocido", "Álbum desconocido"),
    ("it", "Artista sconosciuto", "Genere sconosciuto", "Album sconosciuto"),
];

impl Placeholders for BuiltinPlaceholders {
    fn placeholder_for(&self, category: Category, locale: &str) -> String {
        let lang = primary_language(locale);
        let (_, artist, genre, album) = TABLE
            .iter()
            .find(|(l, ..)| lang.eq_ignore_ascii_case(l))
            .unwrap_or(&TABLE[0]);
        match category {
            Category::Artist => artist,
            Category::Genre => genre,
            Category::Album => album,
        }
        .to_string()
    }
}

/// `fr-FR`, `fr_FR`, `fr` -> `fr`
fn primary_language(locale: &str) -> &str {
    locale.split(['-', '_']).next().unwrap_or(locale).trim()
}
