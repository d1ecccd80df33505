//! Record frame wrapper.
//!
//! Polars reports height 0 for a frame with no columns, but a cleaning
//! run that removes every column still describes the same number of
//! records. [`RecordFrame`] keeps the row count alongside the data so
//! that count survives total column removal.

use polars::prelude::DataFrame;

/// A tabular record set flowing through the cleaning pipeline.
#[derive(Debug, Clone)]
pub struct RecordFrame {
    data: DataFrame,
    height: usize,
}

impl RecordFrame {
    pub fn new(data: DataFrame) -> Self {
        let height = data.height();
        Self { data, height }
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn into_data(self) -> DataFrame {
        self.data
    }

    /// Number of records, stable across removal of every column.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.data.width()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.data
            .get_column_names_str()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Replaces the underlying frame. The remembered row count follows
    /// the new data unless the new frame has no columns left, in which
    /// case the previous count stands.
    pub(crate) fn set_data(&mut self, data: DataFrame) {
        if data.width() > 0 {
            self.height = data.height();
        }
        self.data = data;
    }
}

#[cfg(test)]
mod tests {
    use super::RecordFrame;
    use polars::prelude::{DataFrame, NamedFrom, Series};

    fn two_row_frame() -> DataFrame {
        let column = Series::new("name".into(), ["a", "b"]).into();
        DataFrame::new(vec![column]).expect("frame")
    }

    #[test]
    fn height_tracks_data() {
        let frame = RecordFrame::new(two_row_frame());
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.width(), 1);
    }

    #[test]
    fn height_survives_removal_of_all_columns() {
        let mut frame = RecordFrame::new(two_row_frame());
        let empty = frame.data().drop("name").expect("drop");
        frame.set_data(empty);
        assert_eq!(frame.width(), 0);
        assert_eq!(frame.height(), 2);
    }

    #[test]
    fn height_follows_row_changes() {
        let mut frame = RecordFrame::new(two_row_frame());
        let head = frame.data().head(Some(1));
        frame.set_data(head);
        assert_eq!(frame.height(), 1);
    }
}
