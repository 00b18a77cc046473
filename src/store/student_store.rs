//! MongoDB-backed student record storage

use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_document, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{Student, StudentUpdate};

/// The string fields searched by the substring search endpoint.
pub const SEARCHED_FIELDS: [&str; 4] = ["firstName", "lastName", "email", "studentId"];

/// Wraps one `students` collection. Created once at startup and shared by
/// every handler; the driver's connection pool handles concurrent use.
pub struct StudentStore {
    client: Client,
    students: Collection<Student>,
}

impl StudentStore {
    /// Build the client and collection handles. The driver connects lazily,
    /// so this succeeds even when the server is unreachable; use [`ping`]
    /// to probe the connection.
    ///
    /// [`ping`]: StudentStore::ping
    pub async fn connect(config: &Config) -> Result<Self> {
        let mut options = ClientOptions::parse(&config.mongo_uri).await?;
        options.server_selection_timeout = Some(config.server_selection_timeout);

        let client = Client::with_options(options)?;
        let students = client
            .database(&config.database)
            .collection(&config.collection);

        Ok(Self { client, students })
    }

    /// Round-trip to the server, subject to the server-selection timeout.
    pub async fn ping(&self) -> Result<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }

    /// Every document in the collection, unordered and unpaginated.
    pub async fn find_all(&self) -> Result<Vec<Student>> {
        let cursor = self.students.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<Student>> {
        Ok(self.students.find_one(doc! { "_id": id }).await?)
    }

    /// Documents where any of [`SEARCHED_FIELDS`] contains `query` as a
    /// case-insensitive substring. An empty query matches everything.
    pub async fn search(&self, query: &str) -> Result<Vec<Student>> {
        let cursor = self.students.find(search_filter(query)).await?;
        Ok(cursor.try_collect().await?)
    }

    /// Insert one document and return the id the store assigned.
    pub async fn insert(&self, student: &Student) -> Result<ObjectId> {
        let result = self.students.insert_one(student).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| Error::InvalidId(result.inserted_id.to_string()))
    }

    /// Overwrite every client-writable field of the matching document with
    /// the values in `update` (nulls included) and stamp `updatedAt`.
    /// Returns the matched count; zero means no such document and no write.
    pub async fn replace_fields(&self, id: ObjectId, update: &StudentUpdate) -> Result<u64> {
        let set = to_document(update)?;
        let result = self
            .students
            .update_one(doc! { "_id": id }, doc! { "$set": set })
            .await?;
        Ok(result.matched_count)
    }

    /// Remove the matching document. Returns the deleted count.
    pub async fn delete_by_id(&self, id: ObjectId) -> Result<u64> {
        let result = self.students.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count)
    }
}

/// `$or` of case-insensitive regexes over the searched fields. The query is
/// escaped so it matches as a literal substring, not as a pattern.
fn search_filter(query: &str) -> Document {
    let pattern = regex::escape(query);
    let clauses: Vec<Document> = SEARCHED_FIELDS
        .iter()
        .map(|field| {
            let mut clause = Document::new();
            clause.insert(*field, doc! { "$regex": &pattern, "$options": "i" });
            clause
        })
        .collect();
    doc! { "$or": clauses }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::Bson;

    fn clause_patterns(filter: &Document) -> Vec<(String, String)> {
        let Some(Bson::Array(clauses)) = filter.get("$or") else {
            panic!("filter should be an $or");
        };
        clauses
            .iter()
            .map(|clause| {
                let doc = clause.as_document().expect("clause is a document");
                let (field, value) = doc.iter().next().expect("clause has one field");
                let regex = value
                    .as_document()
                    .and_then(|d| d.get_str("$regex").ok())
                    .expect("clause has a $regex");
                (field.clone(), regex.to_string())
            })
            .collect()
    }

    #[test]
    fn filter_covers_all_searched_fields() {
        let filter = search_filter("alice");
        let clauses = clause_patterns(&filter);

        let fields: Vec<&str> = clauses.iter().map(|(f, _)| f.as_str()).collect();
        assert_eq!(fields, SEARCHED_FIELDS);
        assert!(clauses.iter().all(|(_, p)| p == "alice"));
    }

    #[test]
    fn filter_requests_case_insensitive_match() {
        let filter = search_filter("Alice");
        let clause = filter.get_array("$or").unwrap()[0]
            .as_document()
            .unwrap()
            .get_document("firstName")
            .unwrap();
        assert_eq!(clause.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn empty_query_produces_empty_pattern() {
        let filter = search_filter("");
        // Empty pattern matches every string, so the filter matches everything
        assert!(clause_patterns(&filter).iter().all(|(_, p)| p.is_empty()));
    }

    #[test]
    fn regex_metacharacters_are_escaped() {
        let filter = search_filter("j.doe+1@x.com");
        let (_, pattern) = clause_patterns(&filter).remove(0);
        assert_eq!(pattern, r"j\.doe\+1@x\.com");
    }
}
