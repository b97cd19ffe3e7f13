// crates/faculty-core/src/schema.rs
//
// Collections, validators and indexes of the `faculty_db` document store.
// The mapper does not consult any of this; the store enforces it.

use chrono::{TimeZone, Utc};
use once_cell::sync::Lazy;
use serde_json::{json, Map, Value};

use crate::types::{
    DepartmentBlock, FacultyDocument, Publication, UniversityBlock, UniversityRef,
};

pub const DATABASE_NAME: &str = "faculty_db";
pub const UNIVERSITIES_COLLECTION: &str = "universities";
pub const FACULTY_COLLECTION: &str = "faculty";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Ascending,
    Text,
}

#[derive(Debug, Clone)]
pub struct IndexDescriptor {
    pub collection: &'static str,
    pub keys: &'static [&'static str],
    pub kind: IndexKind,
    pub unique: bool,
    pub sparse: bool,
    /// Explicit name; otherwise the store's default `<field>_<dir>` naming.
    pub name: Option<&'static str>,
    pub weights: &'static [(&'static str, u32)],
}

impl IndexDescriptor {
    const fn ascending(collection: &'static str, keys: &'static [&'static str]) -> Self {
        Self {
            collection,
            keys,
            kind: IndexKind::Ascending,
            unique: false,
            sparse: false,
            name: None,
            weights: &[],
        }
    }

    pub fn key_document(&self) -> Value {
        let mut keys = Map::new();
        for key in self.keys {
            let value = match self.kind {
                IndexKind::Ascending => json!(1),
                IndexKind::Text => json!("text"),
            };
            keys.insert((*key).to_string(), value);
        }
        Value::Object(keys)
    }

    pub fn index_name(&self) -> String {
        if let Some(name) = self.name {
            return name.to_string();
        }
        let suffix = match self.kind {
            IndexKind::Ascending => "1",
            IndexKind::Text => "text",
        };
        self.keys
            .iter()
            .map(|key| format!("{key}_{suffix}"))
            .collect::<Vec<_>>()
            .join("_")
    }

    pub fn weight(&self, field: &str) -> Option<u32> {
        self.weights
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, weight)| *weight)
    }

    fn to_index_spec(&self) -> Value {
        let mut spec = Map::new();
        spec.insert("key".to_string(), self.key_document());
        spec.insert("name".to_string(), Value::String(self.index_name()));
        if self.unique {
            spec.insert("unique".to_string(), Value::Bool(true));
        }
        if self.sparse {
            spec.insert("sparse".to_string(), Value::Bool(true));
        }
        if !self.weights.is_empty() {
            let weights: Map<String, Value> = self
                .keys
                .iter()
                .filter_map(|key| {
                    self.weight(key)
                        .map(|weight| ((*key).to_string(), json!(weight)))
                })
                .collect();
            spec.insert("weights".to_string(), Value::Object(weights));
        }
        Value::Object(spec)
    }
}

static INDEXES: Lazy<Vec<IndexDescriptor>> = Lazy::new(|| {
    vec![
        IndexDescriptor {
            unique: true,
            ..IndexDescriptor::ascending(UNIVERSITIES_COLLECTION, &["name"])
        },
        IndexDescriptor::ascending(UNIVERSITIES_COLLECTION, &["departments.name"]),
        IndexDescriptor::ascending(FACULTY_COLLECTION, &["last_name", "first_name"]),
        IndexDescriptor {
            unique: true,
            sparse: true,
            ..IndexDescriptor::ascending(FACULTY_COLLECTION, &["email"])
        },
        IndexDescriptor::ascending(FACULTY_COLLECTION, &["university.name", "department.name"]),
        IndexDescriptor::ascending(FACULTY_COLLECTION, &["research_interests"]),
        IndexDescriptor::ascending(FACULTY_COLLECTION, &["publications.year"]),
        IndexDescriptor {
            collection: FACULTY_COLLECTION,
            keys: &[
                "first_name",
                "last_name",
                "publications.title",
                "research_interests",
            ],
            kind: IndexKind::Text,
            unique: false,
            sparse: false,
            name: Some("faculty_text_search"),
            weights: &[
                ("last_name", 10),
                ("first_name", 5),
                ("research_interests", 3),
                ("publications.title", 1),
            ],
        },
    ]
});

pub fn all_indexes() -> &'static [IndexDescriptor] {
    INDEXES.as_slice()
}

pub fn indexes_for(collection: &str) -> impl Iterator<Item = &'static IndexDescriptor> + '_ {
    all_indexes()
        .iter()
        .filter(move |index| index.collection == collection)
}

fn string_prop(description: &str) -> Value {
    json!({ "bsonType": "string", "description": description })
}

fn date_prop(description: &str) -> Value {
    json!({ "bsonType": "date", "description": description })
}

fn object_array_prop(description: &str) -> Value {
    json!({
        "bsonType": "array",
        "description": description,
        "items": { "bsonType": "object" }
    })
}

pub fn universities_validator() -> Value {
    json!({
        "$jsonSchema": {
            "bsonType": "object",
            "required": ["name"],
            "properties": {
                "name": string_prop("Name of the university"),
                "location": string_prop("University location"),
                "website": string_prop("University website URL"),
                "departments": {
                    "bsonType": "array",
                    "description": "List of departments within the university",
                    "items": {
                        "bsonType": "object",
                        "required": ["name"],
                        "properties": {
                            "name": string_prop("Name of the department"),
                            "website": string_prop("Department website URL")
                        }
                    }
                },
                "created_at": date_prop("Timestamp of when the document was created"),
                "updated_at": date_prop("Timestamp of the last update to the document")
            }
        }
    })
}

pub fn faculty_validator() -> Value {
    json!({
        "$jsonSchema": {
            "bsonType": "object",
            "required": ["first_name", "last_name", "university", "department"],
            "properties": {
                "first_name": string_prop("Faculty member's first name"),
                "last_name": string_prop("Faculty member's last name"),
                "title": string_prop("Faculty member's title or position"),
                "email": string_prop("Faculty member's email address"),
                "profile_url": string_prop("URL to faculty member's profile page"),
                "university": {
                    "bsonType": "object",
                    "required": ["name"],
                    "description": "University information",
                    "properties": {
                        "name": string_prop("Name of the university"),
                        "university_id": {
                            "bsonType": "objectId",
                            "description": "Reference to university document"
                        }
                    }
                },
                "department": {
                    "bsonType": "object",
                    "required": ["name"],
                    "description": "Department information",
                    "properties": {
                        "name": string_prop("Name of the department")
                    }
                },
                "research_interests": {
                    "bsonType": "array",
                    "description": "List of research interests",
                    "items": { "bsonType": "string" }
                },
                "publications": {
                    "bsonType": "array",
                    "description": "List of publications",
                    "items": {
                        "bsonType": "object",
                        "properties": {
                            "title": string_prop("Title of the publication"),
                            "venue": string_prop("Publication venue (journal, conference, etc.)"),
                            "year": { "bsonType": "int", "description": "Publication year" },
                            "doi": string_prop("Digital Object Identifier"),
                            "url": string_prop("URL to the publication"),
                            "authors": {
                                "bsonType": "array",
                                "description": "List of authors",
                                "items": { "bsonType": "string" }
                            },
                            "is_primary_author": {
                                "bsonType": "bool",
                                "description": "Whether the faculty member is the primary author"
                            }
                        }
                    }
                },
                "courses": object_array_prop("Courses taught by the faculty member"),
                "research_projects": object_array_prop("Research projects"),
                "awards": object_array_prop("Awards and recognitions"),
                "raw_data": {
                    "bsonType": "object",
                    "description": "Original scraped data in its raw form"
                },
                "created_at": date_prop("Timestamp of when the document was created"),
                "updated_at": date_prop("Timestamp of the last update to the document")
            }
        }
    })
}

/// `create` commands for both collections, validators attached.
pub fn collection_commands() -> Vec<Value> {
    vec![
        json!({ "create": UNIVERSITIES_COLLECTION, "validator": universities_validator() }),
        json!({ "create": FACULTY_COLLECTION, "validator": faculty_validator() }),
    ]
}

/// One `createIndexes` command per collection.
pub fn index_commands() -> Vec<Value> {
    [UNIVERSITIES_COLLECTION, FACULTY_COLLECTION]
        .into_iter()
        .map(|collection| {
            let indexes: Vec<Value> = indexes_for(collection)
                .map(IndexDescriptor::to_index_spec)
                .collect();
            json!({ "createIndexes": collection, "indexes": indexes })
        })
        .collect()
}

/// Everything needed to set up the store, as a single JSON document.
pub fn setup_document() -> Value {
    json!({
        "database": DATABASE_NAME,
        "collections": collection_commands(),
        "indexes": index_commands(),
    })
}

/// Illustrative faculty document. Its university reference is an objectId
/// in extended JSON, as a document written by the store itself would hold.
pub fn sample_faculty() -> FacultyDocument {
    let now = Utc::now();
    FacultyDocument {
        first_name: Some("Jane".into()),
        last_name: Some("Smith".into()),
        title: Some("Associate Professor".into()),
        email: Some("jane.smith@stanford.edu".into()),
        profile_url: Some("https://cs.stanford.edu/people/jsmith".into()),
        university: UniversityBlock {
            name: Some("Stanford University".into()),
            university_id: Some(UniversityRef::Object(
                json!({ "$oid": "5f8f8f8f8f8f8f8f8f8f8f8f" }),
            )),
            ..UniversityBlock::default()
        },
        department: DepartmentBlock {
            name: Some("Computer Science".into()),
            ..DepartmentBlock::default()
        },
        research_interests: vec![
            "Machine Learning".into(),
            "Computer Vision".into(),
            "Artificial Intelligence".into(),
        ],
        publications: vec![
            Publication {
                title: Some("Deep Learning for Computer Vision".into()),
                venue: Some("Conference on Computer Vision and Pattern Recognition".into()),
                year: Some(2023),
                doi: Some("10.1145/12345.67890".into()),
                url: Some("https://doi.org/10.1145/12345.67890".into()),
                authors: Some(vec![
                    "Jane Smith".into(),
                    "John Doe".into(),
                    "Alice Johnson".into(),
                ]),
                is_primary_author: Some(true),
            },
            Publication {
                title: Some("Advances in Neural Networks".into()),
                venue: Some("Journal of Machine Learning Research".into()),
                year: Some(2022),
                doi: Some("10.1145/98765.43210".into()),
                url: Some("https://doi.org/10.1145/98765.43210".into()),
                authors: Some(vec![
                    "Bob Brown".into(),
                    "Jane Smith".into(),
                    "Carol White".into(),
                ]),
                is_primary_author: Some(false),
            },
        ],
        courses: Some(vec![
            json!({ "code": "CS231", "name": "Deep Learning for Computer Vision", "term": "Spring 2023" }),
            json!({ "code": "CS229", "name": "Machine Learning", "term": "Fall 2022" }),
        ]),
        research_projects: Some(vec![json!({
            "name": "Neural Scene Representation",
            "description": "Research on representing 3D scenes with neural networks",
            "funding": "NSF Grant #12345",
            "start_date": Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).single(),
            "end_date": Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).single(),
        })]),
        awards: Some(vec![json!({
            "name": "Outstanding Faculty Award",
            "organization": "Computer Science Department",
            "year": 2022
        })]),
        raw_data: Some(json!({})),
        created_at: Some(now),
        updated_at: Some(now),
        sql_ids: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_index_weights() {
        let text = all_indexes()
            .iter()
            .find(|index| index.kind == IndexKind::Text)
            .expect("text index");

        assert_eq!(text.index_name(), "faculty_text_search");
        assert_eq!(text.weight("first_name"), Some(5));
        assert_eq!(text.weight("last_name"), Some(10));
        assert_eq!(text.weight("publications.title"), Some(1));
        assert_eq!(text.weight("research_interests"), Some(3));
        assert_eq!(text.weight("email"), None);
    }

    #[test]
    fn email_index_is_sparse_unique() {
        let email = indexes_for(FACULTY_COLLECTION)
            .find(|index| index.keys == ["email"])
            .expect("email index");
        assert!(email.unique);
        assert!(email.sparse);
        assert_eq!(email.index_name(), "email_1");
    }

    #[test]
    fn compound_index_keeps_key_order() {
        let name_index = indexes_for(FACULTY_COLLECTION)
            .find(|index| index.keys.len() == 2 && index.keys[0] == "last_name")
            .expect("name index");
        let key_document = name_index.key_document();
        let keys: Vec<&String> = key_document
            .as_object()
            .expect("key document")
            .keys()
            .collect();
        assert_eq!(keys, ["last_name", "first_name"]);
        assert_eq!(name_index.index_name(), "last_name_1_first_name_1");
    }

    #[test]
    fn index_commands_group_by_collection() {
        let commands = index_commands();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0]["createIndexes"], UNIVERSITIES_COLLECTION);
        assert_eq!(commands[0]["indexes"].as_array().map(Vec::len), Some(2));
        assert_eq!(commands[1]["createIndexes"], FACULTY_COLLECTION);
        assert_eq!(commands[1]["indexes"].as_array().map(Vec::len), Some(6));
        assert_eq!(commands[0]["indexes"][0]["unique"], true);
    }

    #[test]
    fn faculty_validator_requires_identity_fields() {
        let validator = faculty_validator();
        assert_eq!(
            validator["$jsonSchema"]["required"],
            json!(["first_name", "last_name", "university", "department"])
        );
        assert_eq!(
            validator["$jsonSchema"]["properties"]["publications"]["items"]["properties"]["year"]
                ["bsonType"],
            "int"
        );
    }

    #[test]
    fn sample_document_satisfies_required_fields() {
        let sample = serde_json::to_value(sample_faculty()).expect("serialize sample");
        for field in ["first_name", "last_name"] {
            assert!(sample[field].is_string(), "{field} missing");
        }
        assert!(sample["university"]["name"].is_string());
        assert!(sample["department"]["name"].is_string());
        assert!(sample.get("_sql_ids").is_none());
        assert_eq!(
            sample["university"]["university_id"],
            json!({ "$oid": "5f8f8f8f8f8f8f8f8f8f8f8f" })
        );
    }

    #[test]
    fn only_text_index_renders_weights() {
        for command in index_commands() {
            for index in command["indexes"].as_array().expect("indexes array") {
                let is_text = index["name"] == "faculty_text_search";
                assert_eq!(index.get("weights").is_some(), is_text);
            }
        }
    }
}
