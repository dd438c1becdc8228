//! Closed filter vocabularies for the browse endpoint, and the serializer
//! that turns a selection into the endpoint's filter segment.
//!
//! The upstream parses segments positionally-insensitively but is strict
//! about the separators: `<key>:<comma-joined-codes>` segments joined with
//! `~`. Codes only ever come from these enums, so no escaping happens.

/// Browse category, i.e. the path segment after `/napi/browse/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    MoviesAtHome,
    MoviesInTheaters,
    MoviesComingSoon,
    TvSeriesBrowse,
}

impl ResourceType {
    pub const ALL: &'static [Self] = &[
        Self::MoviesAtHome,
        Self::MoviesInTheaters,
        Self::MoviesComingSoon,
        Self::TvSeriesBrowse,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::MoviesAtHome => "movies_at_home",
            Self::MoviesInTheaters => "movies_in_theaters",
            Self::MoviesComingSoon => "movies_coming_soon",
            Self::TvSeriesBrowse => "tv_series_browse",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::MoviesAtHome => "Movies at home",
            Self::MoviesInTheaters => "Movies in theaters",
            Self::MoviesComingSoon => "Movies coming soon",
            Self::TvSeriesBrowse => "TV shows",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.code() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Popular,
    Newest,
    AZ,
    AudienceLowest,
    AudienceHighest,
    CriticsLowest,
    CriticsHighest,
}

impl SortKey {
    pub const ALL: &'static [Self] = &[
        Self::Popular,
        Self::Newest,
        Self::AZ,
        Self::AudienceLowest,
        Self::AudienceHighest,
        Self::CriticsLowest,
        Self::CriticsHighest,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::Newest => "newest",
            Self::AZ => "a_z",
            Self::AudienceLowest => "audience_lowest",
            Self::AudienceHighest => "audience_highest",
            Self::CriticsLowest => "critics_lowest",
            Self::CriticsHighest => "critics_highest",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Popular => "Popularity",
            Self::Newest => "Release date",
            Self::AZ => "Title",
            Self::AudienceLowest => "Lowest audience score",
            Self::AudienceHighest => "Highest audience score",
            Self::CriticsLowest => "Lowest critics score",
            Self::CriticsHighest => "Highest critics score",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.code() == code)
    }
}

/// Critics score band. "Certified Fresh" is a distinct badge on top of
/// Fresh, so it is its own code upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriticsBand {
    CertifiedFresh,
    Fresh,
    Rotten,
}

impl CriticsBand {
    pub const ALL: &'static [Self] = &[Self::CertifiedFresh, Self::Fresh, Self::Rotten];

    pub fn code(self) -> &'static str {
        match self {
            Self::CertifiedFresh => "certified_fresh",
            Self::Fresh => "fresh",
            Self::Rotten => "rotten",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::CertifiedFresh => "Certified Fresh",
            Self::Fresh => "Fresh (>60%)",
            Self::Rotten => "Rotten (<60%)",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|b| b.code() == code)
    }
}

/// Audience score band. The upstream codes are the popcorn-bucket states,
/// not the displayed wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudienceBand {
    Upright,
    Spilled,
}

impl AudienceBand {
    pub const ALL: &'static [Self] = &[Self::Upright, Self::Spilled];

    pub fn code(self) -> &'static str {
        match self {
            Self::Upright => "upright",
            Self::Spilled => "spilled",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Upright => "Fresh (>60%)",
            Self::Spilled => "Rotten (<60%)",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|b| b.code() == code)
    }
}

/// Streaming affiliate carried in the `affiliates:` segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    AmazonPrime,
    AmcPlus,
    AppleTvPlus,
    AppleTvUs,
    DisneyPlus,
    Hulu,
    MaxUs,
    Netflix,
    ParamountPlus,
    Peacock,
    Showtime,
    Vudu,
}

impl Platform {
    pub const ALL: &'static [Self] = &[
        Self::AmazonPrime,
        Self::AmcPlus,
        Self::AppleTvPlus,
        Self::AppleTvUs,
        Self::DisneyPlus,
        Self::Hulu,
        Self::MaxUs,
        Self::Netflix,
        Self::ParamountPlus,
        Self::Peacock,
        Self::Showtime,
        Self::Vudu,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::AmazonPrime => "amazon_prime",
            Self::AmcPlus => "amc_plus",
            Self::AppleTvPlus => "apple_tv_plus",
            Self::AppleTvUs => "apple_tv_us",
            Self::DisneyPlus => "disney_plus",
            Self::Hulu => "hulu",
            Self::MaxUs => "max_us",
            Self::Netflix => "netflix",
            Self::ParamountPlus => "paramount_plus",
            Self::Peacock => "peacock",
            Self::Showtime => "showtime",
            Self::Vudu => "vudu",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::AmazonPrime => "Amazon Prime",
            Self::AmcPlus => "AMC+",
            Self::AppleTvPlus => "Apple TV+",
            Self::AppleTvUs => "Apple TV",
            Self::DisneyPlus => "Disney+",
            Self::Hulu => "Hulu",
            Self::MaxUs => "HBO Max",
            Self::Netflix => "Netflix",
            Self::ParamountPlus => "Paramount+",
            Self::Peacock => "Peacock",
            Self::Showtime => "Showtime",
            Self::Vudu => "Vudu",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.code() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Genre {
    Action,
    Adventure,
    Animation,
    Anime,
    Biography,
    Comedy,
    Crime,
    Documentary,
    Drama,
    Entertainment,
    FaithAndSpirituality,
    Fantasy,
    GameShow,
    Lgbtq,
    HealthAndWellness,
    History,
    Holiday,
    Horror,
    HouseAndGarden,
    KidsAndFamily,
    Music,
    Musical,
    MysteryAndThriller,
    Nature,
    News,
    Reality,
    Romance,
    SciFi,
    Short,
    Soap,
    SpecialInterest,
    Sports,
    StandUp,
    TalkShow,
    Travel,
    Variety,
    War,
    Western,
}

impl Genre {
    pub const ALL: &'static [Self] = &[
        Self::Action,
        Self::Adventure,
        Self::Animation,
        Self::Anime,
        Self::Biography,
        Self::Comedy,
        Self::Crime,
        Self::Documentary,
        Self::Drama,
        Self::Entertainment,
        Self::FaithAndSpirituality,
        Self::Fantasy,
        Self::GameShow,
        Self::Lgbtq,
        Self::HealthAndWellness,
        Self::History,
        Self::Holiday,
        Self::Horror,
        Self::HouseAndGarden,
        Self::KidsAndFamily,
        Self::Music,
        Self::Musical,
        Self::MysteryAndThriller,
        Self::Nature,
        Self::News,
        Self::Reality,
        Self::Romance,
        Self::SciFi,
        Self::Short,
        Self::Soap,
        Self::SpecialInterest,
        Self::Sports,
        Self::StandUp,
        Self::TalkShow,
        Self::Travel,
        Self::Variety,
        Self::War,
        Self::Western,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Adventure => "adventure",
            Self::Animation => "animation",
            Self::Anime => "anime",
            Self::Biography => "biography",
            Self::Comedy => "comedy",
            Self::Crime => "crime",
            Self::Documentary => "documentary",
            Self::Drama => "drama",
            Self::Entertainment => "entertainment",
            Self::FaithAndSpirituality => "faith_and_spirituality",
            Self::Fantasy => "fantasy",
            Self::GameShow => "game_show",
            Self::Lgbtq => "lgbtq",
            Self::HealthAndWellness => "health_and_wellness",
            Self::History => "history",
            Self::Holiday => "holiday",
            Self::Horror => "horror",
            Self::HouseAndGarden => "house_and_garden",
            Self::KidsAndFamily => "kids_and_family",
            Self::Music => "music",
            Self::Musical => "musical",
            Self::MysteryAndThriller => "mystery_and_thriller",
            Self::Nature => "nature",
            Self::News => "news",
            Self::Reality => "reality",
            Self::Romance => "romance",
            Self::SciFi => "sci_fi",
            Self::Short => "short",
            Self::Soap => "soap",
            Self::SpecialInterest => "special_interest",
            Self::Sports => "sports",
            Self::StandUp => "stand_up",
            Self::TalkShow => "talk_show",
            Self::Travel => "travel",
            Self::Variety => "variety",
            Self::War => "war",
            Self::Western => "western",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Action => "Action",
            Self::Adventure => "Adventure",
            Self::Animation => "Animation",
            Self::Anime => "Anime",
            Self::Biography => "Biography",
            Self::Comedy => "Comedy",
            Self::Crime => "Crime",
            Self::Documentary => "Documentary",
            Self::Drama => "Drama",
            Self::Entertainment => "Entertainment",
            Self::FaithAndSpirituality => "Faith & Spirituality",
            Self::Fantasy => "Fantasy",
            Self::GameShow => "Game Show",
            Self::Lgbtq => "LGBTQ",
            Self::HealthAndWellness => "Health & Wellness",
            Self::History => "History",
            Self::Holiday => "Holiday",
            Self::Horror => "Horror",
            Self::HouseAndGarden => "House & Garden",
            Self::KidsAndFamily => "Kids & Family",
            Self::Music => "Music",
            Self::Musical => "Musical",
            Self::MysteryAndThriller => "Mystery & Thriller",
            Self::Nature => "Nature",
            Self::News => "News",
            Self::Reality => "Reality",
            Self::Romance => "Romance",
            Self::SciFi => "Sci-Fi",
            Self::Short => "Short",
            Self::Soap => "Soap",
            Self::SpecialInterest => "Special Interest",
            Self::Sports => "Sports",
            Self::StandUp => "Stand Up",
            Self::TalkShow => "Talk Show",
            Self::Travel => "Travel",
            Self::Variety => "Variety",
            Self::War => "War",
            Self::Western => "Western",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|g| g.code() == code)
    }
}

/// One grid query's worth of filter choices. Categories are independent;
/// within a category, codes keep the order they were added in. The empty
/// selection means "show everything".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    pub platforms: Vec<Platform>,
    pub genres: Vec<Genre>,
    pub sort: Option<SortKey>,
    pub critics: Vec<CriticsBand>,
    pub audience: Vec<AudienceBand>,
}

impl FilterSelection {
    /// Serialize to the upstream filter segment. The category order
    /// (affiliates, genres, sort, critics, audience) is fixed no matter
    /// which order the selections were made in.
    pub fn to_query(&self) -> String {
        let mut segments: Vec<String> = Vec::new();
        if !self.platforms.is_empty() {
            segments.push(segment("affiliates", self.platforms.iter().map(|p| p.code())));
        }
        if !self.genres.is_empty() {
            segments.push(segment("genres", self.genres.iter().map(|g| g.code())));
        }
        if let Some(sort) = self.sort {
            segments.push(format!("sort:{}", sort.code()));
        }
        if !self.critics.is_empty() {
            segments.push(segment("critics", self.critics.iter().map(|b| b.code())));
        }
        if !self.audience.is_empty() {
            segments.push(segment("audience", self.audience.iter().map(|b| b.code())));
        }
        segments.join("~")
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
            && self.genres.is_empty()
            && self.sort.is_none()
            && self.critics.is_empty()
            && self.audience.is_empty()
    }
}

fn segment<'a>(key: &str, codes: impl Iterator<Item = &'a str>) -> String {
    format!("{key}:{}", codes.collect::<Vec<_>>().join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_serializes_to_nothing() {
        assert_eq!(FilterSelection::default().to_query(), "");
        assert!(FilterSelection::default().is_empty());
    }

    #[test]
    fn category_order_is_fixed_regardless_of_how_filters_were_added() {
        // Built "backwards": audience first, platform last. The emitted
        // order must still be affiliates, genres, sort, critics, audience.
        let mut selection = FilterSelection::default();
        selection.audience.push(AudienceBand::Upright);
        selection.critics.push(CriticsBand::CertifiedFresh);
        selection.sort = Some(SortKey::Newest);
        selection.genres.push(Genre::Documentary);
        selection.platforms.push(Platform::Netflix);

        assert_eq!(
            selection.to_query(),
            "affiliates:netflix~genres:documentary~sort:newest~critics:certified_fresh~audience:upright"
        );
    }

    #[test]
    fn codes_keep_insertion_order_within_a_category() {
        let selection = FilterSelection {
            genres: vec![Genre::Western, Genre::Action],
            ..FilterSelection::default()
        };
        assert_eq!(selection.to_query(), "genres:western,action");

        let selection = FilterSelection {
            platforms: vec![Platform::DisneyPlus, Platform::Netflix],
            ..FilterSelection::default()
        };
        assert_eq!(selection.to_query(), "affiliates:disney_plus,netflix");
    }

    #[test]
    fn genre_before_critics_for_documentary_certified_fresh() {
        let selection = FilterSelection {
            genres: vec![Genre::Documentary],
            critics: vec![CriticsBand::CertifiedFresh],
            ..FilterSelection::default()
        };
        assert_eq!(selection.to_query(), "genres:documentary~critics:certified_fresh");
    }

    #[test]
    fn unknown_codes_do_not_resolve() {
        assert_eq!(Genre::from_code("documentary"), Some(Genre::Documentary));
        assert_eq!(Genre::from_code("telenovela"), None);
        assert_eq!(SortKey::from_code("za"), None);
        assert_eq!(ResourceType::from_code("movies_at_home"), Some(ResourceType::MoviesAtHome));
    }
}
