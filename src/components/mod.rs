pub mod field_input;
pub mod form_section;
pub mod generation_result;
pub mod session_gate;
pub mod sidebar;
