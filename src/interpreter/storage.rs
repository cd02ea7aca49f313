/// The variable scope stack.
///
/// Frames map names to typed, mutable slots. Only the top frame is
/// consulted for lookups; block frames start with a view of the frame they
/// were entered from, call frames start empty.
pub mod scope;

/// The class table.
///
/// A registry of every declared class, interface, enum and native module,
/// keyed by name.
pub mod class_table;
