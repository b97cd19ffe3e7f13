// crates/faculty-core/src/mapper.rs

use crate::types::{
    DepartmentBlock, DepartmentRow, FacultyDocument, FacultyRow, Publication, PublicationRow,
    RelationalPayload, RelationalRecord, ResearchInterestRow, SqlIds, UniversityBlock,
    UniversityRef, UniversityRow,
};

/// Replaces an absent array field with an empty sequence.
pub fn normalize_sequence<T>(values: Option<Vec<T>>) -> Vec<T> {
    values.unwrap_or_default()
}

/// Maps a flat relational faculty row to a `faculty` document.
///
/// The three relational keys are always copied into `_sql_ids`, even when
/// they are also embedded in the nested blocks, so the document can later be
/// reconciled with the rows it came from.
pub fn sql_to_mongo(record: &RelationalRecord) -> FacultyDocument {
    FacultyDocument {
        first_name: record.first_name.clone(),
        last_name: record.last_name.clone(),
        title: record.title.clone(),
        email: record.email.clone(),
        profile_url: record.profile_url.clone(),
        university: UniversityBlock {
            name: record.university_name.clone(),
            university_id: record.university_id.map(UniversityRef::Sql),
            ..UniversityBlock::default()
        },
        department: DepartmentBlock {
            name: record.department_name.clone(),
            ..DepartmentBlock::default()
        },
        research_interests: normalize_sequence(record.research_interests.clone()),
        publications: normalize_sequence(record.publications.clone()),
        courses: None,
        research_projects: None,
        awards: None,
        raw_data: None,
        created_at: record.created_at,
        updated_at: record.updated_at,
        sql_ids: Some(SqlIds {
            faculty_id: record.faculty_id,
            department_id: record.department_id,
            university_id: record.university_id,
        }),
    }
}

/// Splits a `faculty` document into rows for the university, department and
/// faculty tables plus the interest and publication rows.
///
/// Ids come only from `_sql_ids`. A document without them yields rows with
/// no ids, which the caller inserts as new rows.
pub fn mongo_to_sql(document: &FacultyDocument) -> RelationalPayload {
    let ids = document.sql_ids.unwrap_or_default();

    RelationalPayload {
        university: UniversityRow {
            university_id: ids.university_id,
            name: document.university.name.clone(),
            location: document.university.location.clone(),
            website: document.university.website.clone(),
        },
        department: DepartmentRow {
            department_id: ids.department_id,
            university_id: ids.university_id,
            name: document.department.name.clone(),
            website: document.department.website.clone(),
        },
        faculty: FacultyRow {
            faculty_id: ids.faculty_id,
            department_id: ids.department_id,
            first_name: document.first_name.clone(),
            last_name: document.last_name.clone(),
            title: document.title.clone(),
            email: document.email.clone(),
            profile_url: document.profile_url.clone(),
        },
        research_interests: document
            .research_interests
            .iter()
            .map(|interest| ResearchInterestRow {
                name: interest.clone(),
            })
            .collect(),
        publications: document.publications.iter().map(publication_row).collect(),
    }
}

// Authors are dropped: the relational publication row has no column for them.
fn publication_row(publication: &Publication) -> PublicationRow {
    PublicationRow {
        title: publication.title.clone(),
        venue: publication.venue.clone(),
        year: publication.year,
        doi: publication.doi.clone(),
        url: publication.url.clone(),
        is_primary_author: publication.is_primary_author,
    }
}
