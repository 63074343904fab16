use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use graphql_dependee::{
    from_async_fn, from_fn, is_dependee, pipe, resolve_dependee, ObjectType, Resolver, ResolverError, ResolverRef,
    ResolutionContext,
};
use serde_json::{json, Value};

use crate::engine::{execute_list, execute_object, init_tracing};

fn tax() -> impl Resolver + 'static {
    pipe([
        Arc::new(resolve_dependee("grossPrice")) as ResolverRef,
        Arc::new(from_fn(|params| Ok(json!(params.root.as_f64().unwrap_or_default() * 0.1)))),
    ])
}

fn product_type(gross_price: impl Resolver + 'static) -> Arc<ObjectType> {
    Arc::new(
        ObjectType::new("Product")
            .plain_field("name")
            .field("grossPrice", gross_price)
            .field("tax", tax()),
    )
}

fn gross_price(calls: &Arc<AtomicUsize>, delay: Option<Duration>) -> impl Resolver + 'static {
    let calls = Arc::clone(calls);

    from_async_fn(move |_| {
        calls.fetch_add(1, Ordering::SeqCst);
        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            Ok::<_, ResolverError>(json!(10))
        }
    })
}

#[tokio::test]
async fn tax_reuses_gross_price() {
    init_tracing();

    let calls = Arc::new(AtomicUsize::new(0));
    let product = product_type(is_dependee(gross_price(&calls, None)));
    let context = ResolutionContext::new();

    let response = execute_object(&product, &json!({"name": "Fedora"}), &["name", "grossPrice", "tax"], &context).await;

    insta::assert_json_snapshot!(response, @r###"
    {
      "data": {
        "name": "Fedora",
        "grossPrice": 10,
        "tax": 1.0
      }
    }
    "###);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn dependent_selected_before_its_dependee() {
    init_tracing();

    let calls = Arc::new(AtomicUsize::new(0));
    let product = product_type(is_dependee(gross_price(&calls, None)));
    let context = ResolutionContext::new();

    let response = execute_object(&product, &json!({}), &["tax", "grossPrice"], &context).await;

    assert_eq!(response.data, json!({"tax": 1.0, "grossPrice": 10}));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn tax_without_gross_price_in_the_selection() {
    init_tracing();

    let calls = Arc::new(AtomicUsize::new(0));
    let product = product_type(is_dependee(gross_price(&calls, None)));
    let context = ResolutionContext::new();

    let response = execute_object(&product, &json!({}), &["tax"], &context).await;

    assert_eq!(response.data, json!({"tax": 1.0}));
    assert!(response.errors.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn slow_dependee_is_joined_by_the_fallback() {
    init_tracing();

    let calls = Arc::new(AtomicUsize::new(0));
    let product = product_type(is_dependee(gross_price(&calls, Some(Duration::from_millis(20)))));
    let context = ResolutionContext::new();

    let response = execute_object(&product, &json!({}), &["grossPrice", "tax"], &context).await;

    assert_eq!(response.data, json!({"grossPrice": 10, "tax": 1.0}));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn slow_plain_resolver_runs_twice() {
    init_tracing();

    let calls = Arc::new(AtomicUsize::new(0));
    let product = product_type(gross_price(&calls, Some(Duration::from_millis(20))));
    let context = ResolutionContext::new();

    let response = execute_object(&product, &json!({}), &["grossPrice", "tax"], &context).await;

    assert_eq!(response.data, json!({"grossPrice": 10, "tax": 1.0}));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(context.dependee_records().is_empty());
}

#[tokio::test]
async fn list_items_only_see_their_own_siblings() {
    init_tracing();

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let product = product_type(is_dependee(from_fn(move |params| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(params.root.get("price").cloned().unwrap_or(Value::Null))
    })));
    let context = ResolutionContext::new();

    let items = [json!({"price": 10}), json!({"price": 20})];
    let response = execute_list("products", &product, &items, &["grossPrice", "tax"], &context).await;

    insta::assert_json_snapshot!(response, @r###"
    {
      "data": {
        "products": [
          {
            "grossPrice": 10,
            "tax": 1.0
          },
          {
            "grossPrice": 20,
            "tax": 2.0
          }
        ]
      }
    }
    "###);
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    let paths = context
        .dependee_records()
        .into_iter()
        .map(|record| record.path.to_string())
        .collect::<Vec<_>>();
    assert_eq!(paths, ["products.0.grossPrice", "products.1.grossPrice"]);
}

#[tokio::test]
async fn upstream_errors_reach_the_dependent() {
    init_tracing();

    let product = product_type(is_dependee(from_async_fn(|_| async {
        Err::<Value, _>(ResolverError::new("pricing service unavailable"))
    })));
    let context = ResolutionContext::new();

    let response = execute_object(&product, &json!({}), &["grossPrice", "tax"], &context).await;

    insta::assert_json_snapshot!(response, @r###"
    {
      "data": {
        "grossPrice": null,
        "tax": null
      },
      "errors": [
        {
          "message": "pricing service unavailable",
          "path": "grossPrice"
        },
        {
          "message": "pricing service unavailable",
          "path": "tax"
        }
      ]
    }
    "###);
}
