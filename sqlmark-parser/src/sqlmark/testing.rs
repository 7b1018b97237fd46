use super::document::{SourceDocument, TextBuffer};
use super::pipeline::Highlights;
use super::tokenizing::Category;

pub(crate) const SAMPLE: &str = r#"using Dapper;

public class UserRepository
{
    public IEnumerable<User> Ignored() =>
        _db.Query<User>(@"SELECT Ignored FROM Nowhere WHERE id = @userId");

    // sql begin
    public IEnumerable<User> Adults(int minAge) =>
        _db.Query<User>(@"
            SELECT u.Id, u.Name, COUNT(o.Id) AS Orders
            FROM Users u
            LEFT join Orders o ON o.UserId = u.Id
            WHERE u.Age >= @minAge AND u.Status = 'active'
            GROUP BY u.Id, u.Name");

    public User Find(int id, string table) =>
        _db.QuerySingle<User>($@"SELECT * FROM {table} WHERE Id = @id");
    // sql end

    // sql begin
    public int Touch() =>
        _db.Execute(@"UPDATE Audit SET Seen = 1");
    // sql end
}
"#;

/// Source text of every range highlighted with `category`, in document order.
pub(crate) fn snippets(
    doc: &SourceDocument,
    highlights: &Highlights,
    category: Category,
) -> Vec<String> {
    highlights
        .ranges(category)
        .iter()
        .map(|range| doc.text(range).to_string())
        .collect()
}
