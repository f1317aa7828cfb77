#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::absolute_paths,
    clippy::cast_possible_truncation, // usize -> u32
    clippy::option_if_let_else,
    clippy::implicit_return,
    clippy::indexing_slicing,
    clippy::min_ident_chars,
    clippy::missing_assert_message,
    clippy::module_name_repetitions,
    clippy::pattern_type_mismatch,
    clippy::question_mark_used,
    clippy::self_named_module_files,
    clippy::shadow_reuse,
    clippy::shadow_unrelated,
    clippy::single_call_fn,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::wildcard_enum_match_arm,
    non_snake_case,
)]

pub mod check;
pub mod error;
pub mod history;
pub mod page;
pub mod scrape;
pub mod util;
