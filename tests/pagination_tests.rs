use futures::StreamExt;
use rtaskflow::api::ApiError;
use rtaskflow::core::pagination::{collect_all, pages};
use rtaskflow::errors::{AppError, AppResult};
use rtaskflow::models::Page;
use std::cell::RefCell;

fn page(items: Vec<u32>, total_pages: Option<u32>) -> Page<u32> {
    Page {
        items,
        page: None,
        total_pages,
        total: None,
    }
}

#[tokio::test]
async fn collects_every_page_in_order() {
    let requested = RefCell::new(Vec::new());
    let all = collect_all(|n| {
        requested.borrow_mut().push(n);
        async move {
            let items = vec![n * 10, n * 10 + 1];
            AppResult::Ok(page(items, Some(3)))
        }
    })
    .await
    .expect("all pages");

    assert_eq!(all, vec![0, 1, 10, 11, 20, 21]);
    assert_eq!(*requested.borrow(), vec![0, 1, 2]);
}

#[tokio::test]
async fn missing_total_pages_means_one_page() {
    let calls = RefCell::new(0);
    let all = collect_all(|_| {
        *calls.borrow_mut() += 1;
        async { AppResult::Ok(page(vec![7, 8], None)) }
    })
    .await
    .expect("single page");

    assert_eq!(all, vec![7, 8]);
    assert_eq!(*calls.borrow(), 1);
}

#[tokio::test]
async fn empty_page_stops_early() {
    let all = collect_all(|n| async move {
        let items = if n == 0 { vec![1] } else { Vec::new() };
        AppResult::Ok(page(items, Some(10)))
    })
    .await
    .expect("stops on empty page");
    assert_eq!(all, vec![1]);
}

#[tokio::test]
async fn failing_page_aborts_without_partial_result() {
    let result = collect_all(|n| async move {
        if n == 1 {
            Err(AppError::from(ApiError::new(500, "boom")))
        } else {
            Ok(page(vec![n], Some(3)))
        }
    })
    .await;

    let err = result.expect_err("second page fails");
    assert_eq!(err.api().map(|a| a.status), Some(500));
}

#[tokio::test]
async fn pages_are_fetched_only_when_polled() {
    let requested = RefCell::new(Vec::new());
    let mut stream = Box::pin(pages(|n| {
        requested.borrow_mut().push(n);
        async move { AppResult::Ok(page(vec![n], Some(5))) }
    }));

    let first = stream.next().await.expect("first batch").expect("ok");
    assert_eq!(first, vec![0]);
    assert_eq!(*requested.borrow(), vec![0]);

    let second = stream.next().await.expect("second batch").expect("ok");
    assert_eq!(second, vec![1]);
    assert_eq!(*requested.borrow(), vec![0, 1]);
}

#[tokio::test]
async fn stream_ends_after_an_error() {
    let batches: Vec<AppResult<Vec<u32>>> = pages(|n| async move {
        if n == 0 {
            Err(AppError::Other("offline".to_string()))
        } else {
            Ok(page(vec![n], Some(3)))
        }
    })
    .collect()
    .await;

    assert_eq!(batches.len(), 1);
    assert!(batches[0].is_err());
}
