pub mod parser;
pub mod result;
pub mod reviewer;

pub use parser::{parse_review_response, ParsedReview, FIXED_CODE_MARKER, ISSUES_MARKER};
pub use result::{ReviewRequest, ReviewResult};
pub use reviewer::{review_code, review_code_with, CodeReviewer};
