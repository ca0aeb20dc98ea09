/// One row of the ranked song dataset. Identity is `rank`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SongRecord {
    /// 1-based popularity rank, unique across the dataset.
    pub rank: u32,
    /// Song title.
    pub title: String,
    /// Performing artist.
    pub artist: String,
    /// Year the song was released.
    pub release_year: i32,
}

impl SongRecord {
    /// Convenience constructor.
    pub fn new(
        rank: u32,
        title: impl Into<String>,
        artist: impl Into<String>,
        release_year: i32,
    ) -> Self {
        Self {
            rank,
            title: title.into(),
            artist: artist.into(),
            release_year,
        }
    }
}
