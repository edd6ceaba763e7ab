pub mod bars;
pub mod color;
pub mod grind;
pub mod prompt;
pub mod status_bar;
pub mod task_list;
pub mod weekly;
