//! Just enough of an executor to resolve sibling fields the way an engine does:
//! every field of an object is started in the same turn, then all of them are
//! awaited together.

use std::sync::{Arc, Once};

use futures::future::join_all;
use graphql_dependee::{
    default_field_resolver, FieldPath, ObjectType, Outcome, ResolutionContext, ResolveInfo, ResolveParams,
};
use serde_json::{Map, Value};

#[derive(Debug, Default, serde::Serialize)]
pub struct Response {
    pub data: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, serde::Serialize)]
pub struct GraphqlError {
    pub message: String,
    pub path: String,
}

pub fn init_tracing() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

pub async fn execute_object(
    parent_type: &Arc<ObjectType>,
    parent: &Value,
    selection: &[&str],
    context: &ResolutionContext,
) -> Response {
    let mut errors = Vec::new();
    let data = resolve_object(parent_type, parent, None, selection, context, &mut errors).await;

    Response { data, errors }
}

pub async fn execute_list(
    list_field: &str,
    item_type: &Arc<ObjectType>,
    items: &[Value],
    selection: &[&str],
    context: &ResolutionContext,
) -> Response {
    let list_path = FieldPath::root(list_field);

    let resolutions = items.iter().enumerate().map(|(idx, item)| {
        let item_path = list_path.child(idx);
        async move {
            let mut errors = Vec::new();
            let value = resolve_object(item_type, item, Some(item_path), selection, context, &mut errors).await;
            (value, errors)
        }
    });

    let mut response = Response::default();
    let mut values = Vec::new();

    for (value, errors) in join_all(resolutions).await {
        values.push(value);
        response.errors.extend(errors);
    }

    let mut data = Map::new();
    data.insert(list_field.to_string(), Value::Array(values));
    response.data = Value::Object(data);

    response
}

async fn resolve_object(
    parent_type: &Arc<ObjectType>,
    parent: &Value,
    parent_path: Option<FieldPath>,
    selection: &[&str],
    context: &ResolutionContext,
    errors: &mut Vec<GraphqlError>,
) -> Value {
    let resolutions = selection
        .iter()
        .map(|&name| {
            let path = match &parent_path {
                Some(parent_path) => parent_path.child(name),
                None => FieldPath::root(name),
            };

            let params = ResolveParams {
                root: parent.clone(),
                args: Value::Null,
                context: context.clone(),
                info: ResolveInfo::new(name, path.clone(), Arc::clone(parent_type)),
            };

            let resolution = match parent_type.field_by_name(name).and_then(|field| field.resolver()) {
                Some(resolver) => resolver.resolve(params),
                None => default_field_resolver(params),
            };

            async move { (name, path, resolution.await) }
        })
        .collect::<Vec<_>>();

    let mut object = Map::new();

    for (name, path, result) in join_all(resolutions).await {
        let value = match result {
            Ok(outcome) => outcome.into_value(),
            Err(error) => {
                errors.push(GraphqlError {
                    message: error.to_string(),
                    path: path.to_string(),
                });
                Value::Null
            }
        };

        object.insert(name.to_string(), value);
    }

    Value::Object(object)
}

/// Resolves a single field, as the only field being selected.
pub async fn resolve_field(
    parent_type: &Arc<ObjectType>,
    parent: &Value,
    path: FieldPath,
    context: &ResolutionContext,
) -> graphql_dependee::ResolverResult<Outcome> {
    let name = path.key().as_field().unwrap_or_default().to_string();
    let params = ResolveParams {
        root: parent.clone(),
        args: Value::Null,
        context: context.clone(),
        info: ResolveInfo::new(name.clone(), path, Arc::clone(parent_type)),
    };

    match parent_type.field_by_name(&name).and_then(|field| field.resolver()) {
        Some(resolver) => resolver.resolve(params).await,
        None => default_field_resolver(params).await,
    }
}
