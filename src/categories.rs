//! Broad display categories for genre tokens
//!
//! Used to group a listing's genres for browsing. Matching is a
//! case-insensitive substring check against each category's keywords; the
//! first category in declaration order wins.

/// Name reported for tokens that match no category
pub const OTHER_CATEGORY: &str = "Other";

pub struct GenreCategory {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

pub const CATEGORIES: &[GenreCategory] = &[
    GenreCategory {
        name: "Metal",
        keywords: &[
            "Heavy Metal", "Death Metal", "Black Metal", "Doom Metal", "Thrash Metal",
            "Power Metal", "Progressive Metal", "Symphonic Metal", "Folk Metal",
            "Viking Metal", "Pagan Metal", "Melodic Death Metal", "Technical Death Metal",
            "Brutal Death Metal", "Blackened Death Metal", "Atmospheric Black Metal",
            "Depressive Black Metal", "Raw Black Metal", "Symphonic Black Metal",
            "Progressive Black Metal", "Melodic Black Metal", "Post-Black Metal",
            "Atmospheric Death Metal", "Technical Thrash Metal", "Crossover Thrash",
            "Blackened Thrash Metal", "Speed Metal", "NWOBHM", "Traditional Heavy Metal",
            "Epic Metal", "Gothic Metal", "Industrial Metal", "Nu Metal",
            "Alternative Metal", "Groove Metal", "Southern Metal", "Stoner Metal",
            "Sludge Metal", "Post-Metal", "Atmospheric Metal", "Experimental Metal",
            "Avant-garde Metal", "Dark Metal", "Extreme Metal", "Underground Metal",
        ],
    },
    GenreCategory {
        name: "Rock",
        keywords: &[
            "Hard Rock", "Alternative Rock", "Progressive Rock", "Psychedelic Rock",
            "Post-Rock", "Indie Rock", "Classic Rock", "Blues Rock", "Southern Rock",
            "Garage Rock", "Punk Rock", "Post-Punk", "New Wave", "Shoegaze",
            "Britpop", "Grunge", "Noise Rock", "Math Rock", "Experimental Rock",
            "Art Rock", "Krautrock", "Space Rock", "Stoner Rock", "Desert Rock",
        ],
    },
    GenreCategory {
        name: "Hardcore & Core",
        keywords: &[
            "Hardcore", "Metalcore", "Deathcore", "Grindcore", "Mathcore",
            "Post-Hardcore", "Melodic Hardcore", "Hardcore Punk", "Beatdown Hardcore",
            "Crossover", "Powerviolence", "Fastcore", "Crustcore", "Sludgecore",
            "Noisecore", "Goregrind", "Pornogrind", "Mincecore", "Thrashcore",
        ],
    },
    GenreCategory {
        name: "Electronic & Industrial",
        keywords: &[
            "Electronic", "Industrial", "Industrial Metal", "Industrial Rock",
            "EBM", "Dark Electro", "Synthwave", "Darkwave", "Coldwave",
            "Ambient", "Dark Ambient", "Drone", "Noise", "Power Electronics",
            "Harsh Noise", "Dungeon Synth", "Martial Industrial", "Neofolk Electronic",
            "Cyber Metal", "Digital Hardcore", "Breakcore", "IDM", "Techno",
        ],
    },
    GenreCategory {
        name: "Punk",
        keywords: &[
            "Punk", "Hardcore Punk", "Crust Punk", "D-Beat", "Street Punk",
            "Oi!", "Post-Punk", "Anarcho-Punk", "Celtic Punk", "Folk Punk",
            "Ska Punk", "Pop Punk", "Melodic Punk", "Horror Punk", "Psychobilly",
        ],
    },
    GenreCategory {
        name: "Experimental & Avant-garde",
        keywords: &[
            "Experimental", "Avant-garde", "Free Jazz", "Improvisation",
            "Musique Concrète", "Sound Art", "Field Recording", "Microsound",
            "Lowercase", "Onkyokei", "Reductionism", "Extended Technique",
            "Prepared Instruments", "Circuit Bending", "Glitch", "Plunderphonics",
        ],
    },
];

impl GenreCategory {
    pub fn matches(&self, genre: &str) -> bool {
        let genre = genre.to_lowercase();
        self.keywords
            .iter()
            .any(|keyword| genre.contains(&keyword.to_lowercase()))
    }
}

/// Category name for a single genre token
pub fn categorize_genre(genre: &str) -> &'static str {
    let genre = genre.trim();
    CATEGORIES
        .iter()
        .find(|category| category.matches(genre))
        .map(|category| category.name)
        .unwrap_or(OTHER_CATEGORY)
}

/// Every genre belonging to a category, sorted
///
/// For `Other` this is every genre no category matches. Unknown category
/// names yield nothing.
pub fn genres_for_category(all_genres: &[String], category_name: &str) -> Vec<String> {
    let mut genres: Vec<String> = if category_name == OTHER_CATEGORY {
        all_genres
            .iter()
            .filter(|genre| !CATEGORIES.iter().any(|category| category.matches(genre)))
            .cloned()
            .collect()
    } else {
        match CATEGORIES.iter().find(|category| category.name == category_name) {
            Some(category) => all_genres
                .iter()
                .filter(|genre| category.matches(genre))
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    };
    genres.sort();
    genres
}

pub fn category_names() -> Vec<&'static str> {
    CATEGORIES
        .iter()
        .map(|category| category.name)
        .chain(std::iter::once(OTHER_CATEGORY))
        .collect()
}
