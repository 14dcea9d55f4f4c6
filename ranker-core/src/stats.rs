use ranker_state::AlbumRecord;

/// Summary figures over the whole collection, regardless of any view filter.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionStats<'a> {
    pub count: usize,
    /// `None` when the collection is empty.
    pub average_rating: Option<f64>,
    /// The highest rated album; the earliest added one wins a tie.
    pub top_album: Option<&'a AlbumRecord>,
}
impl<'a> CollectionStats<'a> {
    pub fn compute(records: &'a [AlbumRecord]) -> Self {
        let count = records.len();
        let average_rating = (count > 0).then(|| {
            records.iter().map(|r| r.rating.stars()).sum::<f64>() / count as f64
        });
        // `Iterator::max_by_key` keeps the last maximum, so fold by hand.
        let top_album = records.iter().fold(None, |top: Option<&AlbumRecord>, record| {
            match top {
                Some(top) if top.rating >= record.rating => Some(top),
                _ => Some(record),
            }
        });

        Self {
            count,
            average_rating,
            top_album,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ranker_state::{Draft, RecordId};

    fn records(ratings: &[f64]) -> Vec<AlbumRecord> {
        ratings
            .iter()
            .enumerate()
            .map(|(i, rating)| {
                Draft::manual(format!("Album {i}"), "Artist")
                    .with_rating(*rating)
                    .into_record(RecordId(i.to_string()))
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_average_and_top() {
        let records = records(&[4.0, 5.0, 3.0]);
        let stats = CollectionStats::compute(&records);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.average_rating, Some(4.0));
        assert_eq!(stats.top_album.map(|r| r.id.as_str()), Some("1"));
    }

    #[test]
    fn test_top_tie_goes_to_first() {
        let records = records(&[3.0, 4.5, 2.0, 4.5]);
        let stats = CollectionStats::compute(&records);
        assert_eq!(stats.top_album.map(|r| r.id.as_str()), Some("1"));
    }

    #[test]
    fn test_empty_collection() {
        let stats = CollectionStats::compute(&[]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.average_rating, None);
        assert_eq!(stats.top_album, None);
    }
}
