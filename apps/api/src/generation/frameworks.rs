/// Front-end frameworks offered by the upload form, in display order.
///
/// The handler accepts any non-blank label; this list only drives the form.
pub const SUPPORTED_FRAMEWORKS: &[&str] = &["Next.js", "React", "Vue"];
