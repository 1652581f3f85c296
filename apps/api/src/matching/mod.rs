// Role-fit engine: similarity matching, weighted scoring, recommendations.
// Pure functions over the immutable `SkillCatalog`; the handlers are the only async surface.

pub mod extract;
pub mod handlers;
pub mod recommend;
pub mod scorer;
pub mod similarity;
