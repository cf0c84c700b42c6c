pub mod artifacts;
pub mod output_tree;
pub mod project;
pub mod scaffold;
pub mod template;
