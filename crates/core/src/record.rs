//! Record trait: identity plus the fixed-width table display.

/// A row managed by a record store.
///
/// Ids are plain integers. Uniqueness is not enforced anywhere; stores always
/// act on the first record carrying a given id.
pub trait Record {
    /// Returns the record identifier.
    fn id(&self) -> i32;

    /// Column header line whose widths match [`Record::info`].
    fn header() -> String;

    /// One formatted table row for this record.
    fn info(&self) -> String;
}

/// Render a header followed by one `info` line per record.
pub fn render_table<'a, R, I>(records: I) -> String
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut out = R::header();
    for record in records {
        out.push('\n');
        out.push_str(&record.info());
    }
    out
}
