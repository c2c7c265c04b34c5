// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::Serialize;

/// Identifier of a genre in the bundled table
pub type GenreId = u32;

/// A podcast genre
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Genre {
    pub id: GenreId,
    pub title: &'static str,
    pub description: &'static str,
}

const GENRES: &[Genre] = &[
    Genre {
        id: 1,
        title: "Personal Growth",
        description: "Looking to improve yourself and reach your full potential? Our curated selection features experts and thought leaders sharing their insights and strategies on everything from goal setting and productivity to mindfulness and self-care.",
    },
    Genre {
        id: 2,
        title: "Investigative Journalism",
        description: "Podcasts that will keep you on the edge of your seat. These shows feature in-depth reporting and analysis of some of the most important and intriguing stories of our time, from breaking news to long-form investigations.",
    },
    Genre {
        id: 3,
        title: "History",
        description: "Experience the past like never before. From ancient civilizations to modern times, listen to expert historians as they delve into the stories and events that shaped our world.",
    },
    Genre {
        id: 4,
        title: "Comedy",
        description: "Get ready to laugh. From stand-up comedy to improv, listen to some of the funniest comedians and comedy writers as they share their takes on current events, pop culture, and everyday life.",
    },
    Genre {
        id: 5,
        title: "Entertainment",
        description: "Stay up-to-date with the latest trends, news and happenings in the entertainment world. From film and TV to music and celebrity interviews, listen to experts and industry insiders share their inside scoop.",
    },
    Genre {
        id: 6,
        title: "Business",
        description: "In-depth analysis and expert insight into the business side of the entertainment world, covering film and television production, the music industry, digital media, and more.",
    },
    Genre {
        id: 7,
        title: "Fiction",
        description: "Be transported to new worlds and lose yourself in captivating stories. Science fiction, fantasy, horror and more, told by talented writers and storytellers.",
    },
    Genre {
        id: 8,
        title: "News",
        description: "Stay informed with in-depth coverage and analysis of the most important stories happening around the world, from politics and world events to science and technology.",
    },
    Genre {
        id: 9,
        title: "Kids and Family",
        description: "Entertaining and educational content for children of all ages, from interactive storytelling to science experiments, music, and comedy.",
    },
];

/// All bundled genres, ordered by id
pub fn all() -> &'static [Genre] {
    GENRES
}

/// Look up a genre by id
pub fn by_id(id: GenreId) -> Option<&'static Genre> {
    GENRES.iter().find(|genre| genre.id == id)
}

/// Look up a genre by title, ignoring ASCII case
pub fn by_title(title: &str) -> Option<&'static Genre> {
    let title = title.trim();
    GENRES
        .iter()
        .find(|genre| genre.title.eq_ignore_ascii_case(title))
}

/// Title for a genre id, or an empty string for unknown ids
pub fn title_of(id: GenreId) -> &'static str {
    by_id(id).map(|genre| genre.title).unwrap_or("")
}
