//! List query tests against the in-memory stores
//!
//! Exercises search and pagination end to end through the orchestrator,
//! without the HTTP layer.

use taxi::prelude::*;

// ============================================================================
// Fixtures
// ============================================================================

async fn manufacturers(names: &[&str]) -> TaxiStores {
    let stores = TaxiStores::in_memory();
    for name in names {
        stores
            .manufacturers
            .create(Manufacturer::new(name, "Country"))
            .await
            .unwrap();
    }
    stores
}

async fn models(count: usize) -> TaxiStores {
    let stores = TaxiStores::in_memory();
    let manufacturer = stores
        .manufacturers
        .create(Manufacturer::new("Test Manufacturer", "Test Country"))
        .await
        .unwrap();
    for i in 0..count {
        stores
            .cars
            .create(Car::new(&format!("Model{}", i), manufacturer.id))
            .await
            .unwrap();
    }
    stores
}

fn names(page: &Page<Manufacturer>) -> Vec<&str> {
    page.items.iter().map(|m| m.name.as_str()).collect()
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test]
async fn test_exact_name_search() {
    let stores = manufacturers(&["Volkswagen", "Renault", "BMW"]).await;
    let result = ListQueryOrchestrator::default()
        .list(&*stores.manufacturers, Some("Renault"), None)
        .await
        .unwrap();

    assert_eq!(names(&result.page), vec!["Renault"]);
    assert_eq!(result.search, "Renault");
}

#[tokio::test]
async fn test_substring_search_keeps_creation_order() {
    let stores = manufacturers(&["Volkswagen", "Renault", "BMW"]).await;
    let result = ListQueryOrchestrator::default()
        .list(&*stores.manufacturers, Some("a"), None)
        .await
        .unwrap();

    assert_eq!(names(&result.page), vec!["Volkswagen", "Renault"]);
}

#[tokio::test]
async fn test_search_without_match_is_empty_first_page() {
    let stores = manufacturers(&["Volkswagen", "Renault", "BMW"]).await;
    let result = ListQueryOrchestrator::default()
        .list(&*stores.manufacturers, Some("Audi"), Some("3"))
        .await
        .unwrap();

    assert!(result.page.is_empty());
    assert_eq!(result.page.number, 1);
    assert_eq!(result.page.total_pages, 1);
    assert!(!result.page.has_next);
    assert!(!result.page.has_previous);
}

#[tokio::test]
async fn test_username_search_matches_all_drivers() {
    let stores = TaxiStores::in_memory();
    for (username, license) in [
        ("uklon_driver", "UKL12345"),
        ("bolt_driver", "BLT12345"),
        ("uber_driver", "UBR12345"),
    ] {
        stores
            .drivers
            .create(Driver::new(username, license))
            .await
            .unwrap();
    }

    let result = ListQueryOrchestrator::default()
        .list(&*stores.drivers, Some("driver"), None)
        .await
        .unwrap();

    let usernames: Vec<&str> = result
        .page
        .items
        .iter()
        .map(|d| d.username.as_str())
        .collect();
    assert_eq!(usernames, vec!["uklon_driver", "bolt_driver", "uber_driver"]);
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let stores = manufacturers(&["Volkswagen", "Renault", "BMW", "Audi"]).await;
    let orchestrator = ListQueryOrchestrator::default();

    let lower = orchestrator
        .list(&*stores.manufacturers, Some("a"), None)
        .await
        .unwrap();
    let upper = orchestrator
        .list(&*stores.manufacturers, Some("A"), None)
        .await
        .unwrap();

    assert_eq!(lower.page.items, upper.page.items);
    assert_eq!(names(&lower.page), vec!["Volkswagen", "Renault", "Audi"]);
    assert_eq!(upper.search, "A");
}

#[tokio::test]
async fn test_every_result_contains_fragment_and_no_match_is_dropped() {
    let all = ["Volkswagen", "Renault", "BMW", "Audi", "Skoda", "Tesla", "Fiat"];
    let stores = manufacturers(&all).await;

    for fragment in ["a", "e", "W", "sl", "zz"] {
        let result = ListQueryOrchestrator::new(100)
            .list(&*stores.manufacturers, Some(fragment), None)
            .await
            .unwrap();
        let needle = fragment.to_lowercase();
        let found = names(&result.page);

        for name in &found {
            assert!(name.to_lowercase().contains(&needle), "{} !~ {}", name, fragment);
        }
        for name in all {
            if name.to_lowercase().contains(&needle) {
                assert!(found.contains(&name), "{} missing for {}", name, fragment);
            }
        }
    }
}

#[tokio::test]
async fn test_empty_filter_lists_everything() {
    let stores = manufacturers(&["Volkswagen", "Renault", "BMW"]).await;
    let result = ListQueryOrchestrator::default()
        .list(&*stores.manufacturers, Some(""), None)
        .await
        .unwrap();

    assert_eq!(result.page.total, 3);
    assert_eq!(result.search, "");
}

// ============================================================================
// Pagination
// ============================================================================

#[tokio::test]
async fn test_ten_models_split_into_two_pages() {
    let stores = models(10).await;
    let orchestrator = ListQueryOrchestrator::new(5);

    let first = orchestrator
        .list(&*stores.cars, Some("Model"), Some("1"))
        .await
        .unwrap();
    let first_models: Vec<&str> = first.page.items.iter().map(|c| c.model.as_str()).collect();
    assert_eq!(
        first_models,
        vec!["Model0", "Model1", "Model2", "Model3", "Model4"]
    );
    assert!(first.page.has_next);
    assert!(!first.page.has_previous);

    let second = orchestrator
        .list(&*stores.cars, Some("Model"), Some("2"))
        .await
        .unwrap();
    let second_models: Vec<&str> = second.page.items.iter().map(|c| c.model.as_str()).collect();
    assert_eq!(
        second_models,
        vec!["Model5", "Model6", "Model7", "Model8", "Model9"]
    );
    assert!(second.page.has_previous);
    assert!(!second.page.has_next);
}

#[tokio::test]
async fn test_pages_reconstruct_the_filtered_sequence() {
    let stores = models(13).await;
    let orchestrator = ListQueryOrchestrator::new(3);

    let everything = orchestrator
        .list(&*stores.cars, Some("model1"), None)
        .await
        .unwrap();
    let total_pages = everything.page.total_pages;
    assert_eq!(total_pages, 2);

    let mut collected = Vec::new();
    for number in 1..=total_pages {
        let page = orchestrator
            .list(
                &*stores.cars,
                Some("model1"),
                Some(&number.to_string()),
            )
            .await
            .unwrap()
            .page;
        assert!(page.items.len() <= 3);
        collected.extend(page.items.into_iter().map(|c| c.model));
    }

    assert_eq!(collected, vec!["Model1", "Model10", "Model11", "Model12"]);
}

#[tokio::test]
async fn test_out_of_range_and_malformed_pages() {
    let stores = models(10).await;
    let orchestrator = ListQueryOrchestrator::new(5);

    let overflow = orchestrator
        .list(&*stores.cars, None, Some("99"))
        .await
        .unwrap();
    assert_eq!(overflow.page.number, 2);
    assert_eq!(overflow.page.items[0].model, "Model5");

    let huge = orchestrator
        .list(&*stores.cars, None, Some("99999999999999999999999"))
        .await
        .unwrap();
    assert_eq!(huge.page.number, 2);
    assert_eq!(huge.page.items[0].model, "Model5");

    for raw in ["abc", "0", "-1", ""] {
        let page = orchestrator
            .list(&*stores.cars, None, Some(raw))
            .await
            .unwrap()
            .page;
        assert_eq!(page.number, 1, "page for {:?}", raw);
        assert_eq!(page.items[0].model, "Model0");
    }
}

#[tokio::test]
async fn test_response_shape() {
    let stores = models(7).await;
    let response = ListQueryOrchestrator::new(5)
        .list(&*stores.cars, Some("Model"), Some("2"))
        .await
        .unwrap()
        .into_response();

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(json["pagination"]["page"], 2);
    assert_eq!(json["pagination"]["total"], 7);
    assert_eq!(json["pagination"]["total_pages"], 2);
    assert_eq!(json["pagination"]["has_prev"], true);
    assert_eq!(json["pagination"]["has_next"], false);
    assert_eq!(json["search"], "Model");
}
