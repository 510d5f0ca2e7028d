// handlers/notes/mod.rs - Note route handlers
//
// One module per route. Every operation is scoped by the caller's owner id,
// which comes from the verified claim and never from the request body.

pub mod create;  // POST   /notes
pub mod delete;  // DELETE /notes/{id}
pub mod list;    // GET    /notes
pub mod update;  // PUT    /notes/{id}
pub mod utils;

pub use create::create;
pub use delete::delete;
pub use list::list;
pub use update::update;
