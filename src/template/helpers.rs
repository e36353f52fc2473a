use handlebars::{
    Context, Handlebars, Helper, HelperResult, Output, RenderContext, handlebars_helper,
};
use serde_json::Value;

// eq, ne, lt, lte, gt, gte, and, or, not and len are Handlebars built-ins.
handlebars_helper!(UppercaseHelper: |s: str| s.to_uppercase());
handlebars_helper!(LowercaseHelper: |s: str| s.to_lowercase());
handlebars_helper!(TrimHelper: |s: str| s.trim().to_string());
handlebars_helper!(JsonHelper: |v: Json| v.to_string());
handlebars_helper!(ContainsHelper: |haystack: Json, needle: Json| match haystack {
    Value::String(s) => needle.as_str().is_some_and(|n| s.contains(n)),
    Value::Array(items) => items.contains(needle),
    Value::Object(map) => needle.as_str().is_some_and(|k| map.contains_key(k)),
    _ => false,
});

pub(super) fn register(registry: &mut Handlebars<'static>) {
    registry.register_helper("uppercase", Box::new(UppercaseHelper));
    registry.register_helper("lowercase", Box::new(LowercaseHelper));
    registry.register_helper("trim", Box::new(TrimHelper));
    registry.register_helper("json", Box::new(JsonHelper));
    registry.register_helper("contains", Box::new(ContainsHelper));

    // Helper: {{concat a "-" b}} -> joined text of every parameter
    registry.register_helper(
        "concat",
        Box::new(
            |h: &Helper,
             _: &Handlebars,
             _: &Context,
             _: &mut RenderContext,
             out: &mut dyn Output|
             -> HelperResult {
                for param in h.params() {
                    out.write(&as_text(param.value()))?;
                }
                Ok(())
            },
        ),
    );
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
