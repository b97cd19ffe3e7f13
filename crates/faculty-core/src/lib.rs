pub mod error;
pub mod mapper;
pub mod options;
pub mod schema;
pub mod sync;
pub mod types;

pub use error::{Result, SyncError};
pub use mapper::{mongo_to_sql, normalize_sequence, sql_to_mongo};
pub use options::SyncOptions;
pub use sync::{synchronize, synchronize_data, Direction, SyncOutcome, SyncRequest};
pub use types::{
    DepartmentBlock, DepartmentRow, FacultyDocument, FacultyRow, Publication, PublicationRow,
    RelationalPayload, RelationalRecord, ResearchInterestRow, SqlIds, UniversityBlock,
    UniversityRef, UniversityRow,
};
