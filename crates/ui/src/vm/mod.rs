mod catalog_vm;
mod profile_vm;
mod qcm_vm;
mod results_vm;
mod time_fmt;

pub use catalog_vm::{QuizCardVm, map_quiz_cards};
pub use profile_vm::{MarkRowVm, ProfileVm};
pub use qcm_vm::{CompletionVm, OptionVm, QcmPhaseVm, QcmVm, QuestionVm};
pub use results_vm::{ResultRowVm, map_result_rows};
pub use time_fmt::{format_backend_date, format_clock};
