// Functions are organized by categories
pub mod arithmetic;
pub mod control_flow_ast;
pub mod numeric;
pub mod plot;
pub mod simplify;

// Re-export all function implementations
pub use arithmetic::*;
pub use control_flow_ast::*;
pub use numeric::*;
pub use plot::*;
pub use simplify::*;
