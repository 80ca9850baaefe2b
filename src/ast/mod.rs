/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Node identities, the program root and declarations
/// - expressions: Expression nodes and operators
/// - statements: Statement nodes
/// - types: Type annotations and the canonical types they denote
/// - unparse: Rendering an AST (optionally with computed types) back to source
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
pub mod unparse;
