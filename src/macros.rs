#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

#[macro_export]
macro_rules! rule {
    (
        name: $name:expr,
        pattern: $pat:expr
        $(, markers: $markers:expr)?
        , action: |$m:ident : &RuleMatch, $event:ident : &TriggerEvent| $body:block
        $(,)?
    ) => {{
        $crate::Rule {
            name: $name,
            pattern: ($pat).clone(),
            markers: $crate::engine::MarkerMask::empty() $(| $markers)?,
            action: |$m: &$crate::RuleMatch<'_>, $event: &$crate::TriggerEvent| -> Option<Vec<$crate::Edit>> {
                $body
            },
        }
    }};
}
