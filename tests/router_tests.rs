use pathtree::{Router, RuntimeConfig, RouteTable};

use http::Method;
use std::sync::Arc;

fn example_table() -> &'static str {
    r#"
routes:
  - { method: GET, path: /, handler: root_handler }
  - { method: GET, path: /zoo/animals, handler: get_animals }
  - { method: POST, path: /zoo/animals, handler: create_animal }
  - { method: GET, path: /zoo/animals/:id, handler: get_animal }
  - { method: PUT, path: /zoo/animals/:id, handler: update_animal }
  - { method: PATCH, path: /zoo/animals/:id, handler: patch_animal }
  - { method: DELETE, path: /zoo/animals/:id, handler: delete_animal }
  - { method: GET, path: /zoo/animals/new, handler: new_animal_form }
  - { method: GET, path: /zoo/animals/:id/toys/:toy_id, handler: animal_toy }
  - { method: GET, path: "/zoo/:category/animals/:id/habitats/:habitat_id", handler: habitat }
  - { method: GET, path: "/zoo/assets/*filepath", handler: zoo_assets }
  - { method: HEAD, path: /zoo/health, handler: health_check }
  - { method: OPTIONS, path: /zoo/health, handler: supported_ops }
  - { method: TRACE, path: /zoo/health, handler: trace_route }
"#
}

fn zoo() -> (RouteTable, Router<usize>) {
    let table = RouteTable::from_yaml_str(example_table()).expect("failed to parse route table");
    let built = table
        .build_router(&RuntimeConfig::default())
        .expect("failed to build router");
    assert!(built.rejected.is_empty(), "{:?}", built.rejected);
    (table, built.router)
}

fn assert_route_match(
    table: &RouteTable,
    router: &Router<usize>,
    method: Method,
    path: &str,
    expected_handler: &str,
    expected_params: &[(&str, &str)],
) {
    let m = router
        .route(&method, path)
        .unwrap_or_else(|| panic!("no match for {method} {path}"));
    let handler = table.route_spec(*m.handler).map(|r| r.handler.as_str());
    assert_eq!(handler, Some(expected_handler), "{method} {path}");

    let params: Vec<(&str, &str)> = m.path_params.iter().map(|p| (p.name, p.value)).collect();
    assert_eq!(params, expected_params, "{method} {path}");
}

#[test]
fn test_verb_zoo_routes() {
    let (table, router) = zoo();
    assert_eq!(router.route_count(), 14);

    let cases: &[(Method, &str, &str, &[(&str, &str)])] = &[
        (Method::GET, "/", "root_handler", &[]),
        (Method::GET, "/zoo/animals", "get_animals", &[]),
        (Method::POST, "/zoo/animals", "create_animal", &[]),
        (Method::GET, "/zoo/animals/7", "get_animal", &[("id", "7")]),
        (Method::PUT, "/zoo/animals/7", "update_animal", &[("id", "7")]),
        (Method::PATCH, "/zoo/animals/7", "patch_animal", &[("id", "7")]),
        (Method::DELETE, "/zoo/animals/7", "delete_animal", &[("id", "7")]),
        (Method::GET, "/zoo/animals/new", "new_animal_form", &[]),
        (
            Method::GET,
            "/zoo/animals/7/toys/ball",
            "animal_toy",
            &[("id", "7"), ("toy_id", "ball")],
        ),
        (
            Method::GET,
            "/zoo/mammals/animals/3/habitats/9",
            "habitat",
            &[("category", "mammals"), ("id", "3"), ("habitat_id", "9")],
        ),
        (
            Method::GET,
            "/zoo/assets/img/lion.png",
            "zoo_assets",
            &[("filepath", "img/lion.png")],
        ),
        (Method::HEAD, "/zoo/health", "health_check", &[]),
        (Method::OPTIONS, "/zoo/health", "supported_ops", &[]),
        (Method::TRACE, "/zoo/health", "trace_route", &[]),
    ];

    for (method, path, handler, params) in cases {
        assert_route_match(&table, &router, method.clone(), path, handler, params);
    }
}

#[test]
fn test_static_segment_beats_param_only_for_its_method() {
    let (table, router) = zoo();
    // PUT has no static "new" route, so the parameter catches it.
    assert_route_match(
        &table,
        &router,
        Method::PUT,
        "/zoo/animals/new",
        "update_animal",
        &[("id", "new")],
    );
}

#[test]
fn test_unmatched_requests() {
    let (_, router) = zoo();
    for (method, path) in [
        (Method::GET, "/zoo"),
        (Method::GET, "/zoo/"),
        (Method::GET, "/zoo/animals/"),
        (Method::GET, "/zoo/animals/7/toys"),
        (Method::GET, "/zoo/assets/"),
        (Method::GET, "/ZOO/animals"),
        (Method::POST, "/zoo/animals/7"),
        (Method::GET, ""),
    ] {
        assert!(router.route(&method, path).is_none(), "{method} {path:?}");
    }

    assert_eq!(
        router.allowed_methods("/zoo/animals/7"),
        vec![Method::DELETE, Method::GET, Method::PATCH, Method::PUT]
    );
}

#[test]
fn test_route_patterns_cover_table() {
    let (table, router) = zoo();
    let patterns = router.route_patterns();
    assert_eq!(patterns.len(), table.routes.len());
    for spec in &table.routes {
        assert!(
            patterns
                .iter()
                .any(|(m, p)| m.as_str() == spec.method && p == &spec.path),
            "missing {} {}",
            spec.method,
            spec.path
        );
    }
}

#[test]
fn test_concurrent_lookups() {
    let (table, router) = zoo();
    let router = Arc::new(router);

    std::thread::scope(|scope| {
        for worker in 0..8 {
            let router = Arc::clone(&router);
            let table = &table;
            scope.spawn(move || {
                for i in 0..500 {
                    let path = format!("/zoo/animals/{}/toys/t{}", worker, i);
                    let m = router.route(&Method::GET, &path).expect("route should match");
                    assert_eq!(table.routes[*m.handler].handler, "animal_toy");
                    let worker_id = worker.to_string();
                    assert_eq!(m.get_path_param("id"), Some(worker_id.as_str()));
                    assert_eq!(m.get_path_param("toy_id"), Some(format!("t{}", i).as_str()));
                }
            });
        }
    });
}
