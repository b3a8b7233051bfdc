use std::{
    convert::Infallible,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};
use uapick::{
    Layer as _, Service as _,
    layer::limit::{self, ClientKey, RateLimited},
    service::service_fn,
};

#[tokio::test]
async fn fixed_window_resets_after_the_window_elapsed() {
    let calls = Arc::new(AtomicUsize::new(0));
    let service = limit::guard(3, Duration::from_secs(1)).unwrap().layer({
        let calls = calls.clone();
        service_fn(move |key: ClientKey| {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, Infallible>(key)
            }
        })
    });
    let key = ClientKey::from("127.0.0.1");

    for _ in 0..3 {
        assert!(service.serve(key.clone()).await.is_ok());
    }
    let err = service.serve(key.clone()).await.unwrap_err();
    assert!(err.downcast_ref::<RateLimited>().is_some());
    assert_eq!(3, calls.load(Ordering::SeqCst));

    tokio::time::sleep(Duration::from_millis(1100)).await;

    // the first call of the new window counts as 1, two more fit
    for _ in 0..3 {
        assert!(service.serve(key.clone()).await.is_ok());
    }
    assert!(service.serve(key).await.is_err());
    assert_eq!(6, calls.load(Ordering::SeqCst));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_clients_never_exceed_their_budget() {
    const MAX_REQUESTS: usize = 25;

    let layer = limit::guard(MAX_REQUESTS, Duration::from_secs(60)).unwrap();
    let service = Arc::new(layer.layer(service_fn(|key: ClientKey| async move {
        Ok::<_, Infallible>(key)
    })));

    let mut handles = Vec::new();
    for task in 0..100 {
        let service = service.clone();
        // 4 clients, 25 tasks each
        let key = ClientKey::from(format!("10.0.0.{}", task % 4));
        handles.push(tokio::spawn(async move {
            let mut accepted = 0;
            for _ in 0..10 {
                if service.serve(key.clone()).await.is_ok() {
                    accepted += 1;
                }
            }
            (key, accepted)
        }));
    }

    let mut per_client = std::collections::HashMap::new();
    for handle in handles {
        let (key, accepted) = handle.await.unwrap();
        *per_client.entry(key).or_insert(0) += accepted;
    }

    assert_eq!(4, per_client.len());
    for (key, accepted) in per_client {
        assert_eq!(MAX_REQUESTS, accepted, "{key}");
    }
    assert_eq!(4, layer.policy().counter().tracked_keys());
}

#[tokio::test]
async fn evict_expired_forgets_idle_clients() {
    let layer = limit::guard(1, Duration::from_millis(200)).unwrap();
    let service = layer.layer(service_fn(|key: ClientKey| async move {
        Ok::<_, Infallible>(key)
    }));

    for client in ["a", "b", "c"] {
        assert!(service.serve(ClientKey::from(client)).await.is_ok());
    }
    let counter = layer.policy().counter();
    assert_eq!(3, counter.tracked_keys());
    assert_eq!(0, counter.evict_expired());

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(3, counter.evict_expired());
    assert_eq!(0, counter.tracked_keys());

    assert!(service.serve(ClientKey::from("a")).await.is_ok());
    assert_eq!(1, counter.tracked_keys());
}
