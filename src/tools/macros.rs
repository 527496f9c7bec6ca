//! Tool Definition Macros
//!
//! Simplifies tool creation by reducing boilerplate

/// Define tool metadata using a declarative syntax
///
/// # Example
/// ```
/// let metadata = cursor_admin::tool_metadata! {
///     name: "get_spending_data",
///     description: "Get team member spending information",
///     parameters: [
///         {
///             name: "sortDirection",
///             type: "string",
///             description: "Sort direction",
///             required: false,
///             values: ["asc", "desc"]
///         },
///         {
///             name: "page",
///             type: "number",
///             description: "Page number",
///             required: false
///         }
///     ]
/// };
/// assert_eq!(metadata.parameters.len(), 2);
/// ```
#[macro_export]
macro_rules! tool_metadata {
    (@values) => {
        None
    };
    (@values [$($value:expr),* $(,)?]) => {
        Some(vec![$($value.to_string()),*])
    };
    (
        name: $name:expr,
        description: $description:expr,
        parameters: [
            $(
                {
                    name: $param_name:expr,
                    type: $param_type:expr,
                    description: $param_desc:expr,
                    required: $param_required:expr
                    $(, values: [$($value:expr),* $(,)?])?
                }
            ),* $(,)?
        ]
    ) => {
        $crate::tools::ToolMetadata {
            name: $name.to_string(),
            description: $description.to_string(),
            parameters: vec![
                $(
                    $crate::tools::ToolParameter {
                        name: $param_name.to_string(),
                        param_type: $param_type.to_string(),
                        description: $param_desc.to_string(),
                        required: $param_required,
                        allowed_values: $crate::tool_metadata!(@values $([$($value),*])?),
                    }
                ),*
            ],
        }
    };
}
