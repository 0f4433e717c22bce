use crate::domain::posts::PostRecord;

#[derive(sqlx::FromRow)]
pub(crate) struct PostRow {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) subtitle: String,
    pub(crate) date: String,
    pub(crate) body: String,
    pub(crate) author: String,
    pub(crate) img_url: String,
}

impl From<PostRow> for PostRecord {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            subtitle: row.subtitle,
            date: row.date,
            body: row.body,
            author: row.author,
            img_url: row.img_url,
        }
    }
}
