use prova::testing::{InvocationRecord, RecordingListener};
use prova::{BoxListener, ClassId, FailureCause, LifecycleDispatcher, MethodId, Phase, TestInstance};
use prova::listeners::FnListener;
use std::sync::Arc;

#[test]
fn every_listener_in_a_phase_sees_the_same_triple() {
    let record = InvocationRecord::new();
    let first = RecordingListener::new("first", record.clone());
    let second = RecordingListener::new("second", record.clone());

    // Clones share the observation log; keep the originals for assertions.
    let mut dispatcher = LifecycleDispatcher::with_listeners(
        ClassId::new("Consistency"),
        [
            Box::new(first.clone()) as BoxListener,
            Box::new(second.clone()),
        ],
    );

    let instance: TestInstance = Arc::new(String::from("fixture"));
    let method = MethodId::new("renders");
    let failure: FailureCause = Arc::new(std::io::Error::other("boom"));

    dispatcher.before_test_class().unwrap();
    dispatcher.prepare_test_instance(Some(instance.clone())).unwrap();
    dispatcher
        .before_test_method(Some(instance.clone()), method.clone())
        .unwrap();
    dispatcher
        .after_test_method(Some(instance.clone()), method.clone(), Some(failure.clone()))
        .unwrap();
    dispatcher.after_test_class().unwrap();

    for observed in [first.observed(), second.observed()] {
        assert_eq!(observed.len(), 5);

        // before_test_class: (None, None, None)
        assert_eq!(observed[0].phase, Phase::BeforeClass);
        assert!(observed[0].instance.is_none());
        assert!(observed[0].method.is_none());
        assert!(observed[0].failure.is_none());

        // prepare_test_instance: (instance, None, None)
        assert_eq!(observed[1].phase, Phase::PrepareInstance);
        assert!(Arc::ptr_eq(observed[1].instance.as_ref().unwrap(), &instance));
        assert!(observed[1].method.is_none());
        assert!(observed[1].failure.is_none());

        // before_test_method: (instance, method, None)
        assert_eq!(observed[2].phase, Phase::BeforeMethod);
        assert!(Arc::ptr_eq(observed[2].instance.as_ref().unwrap(), &instance));
        assert_eq!(observed[2].method.as_ref(), Some(&method));
        assert!(observed[2].failure.is_none());

        // after_test_method: (instance, method, failure)
        assert_eq!(observed[3].phase, Phase::AfterMethod);
        assert!(Arc::ptr_eq(observed[3].instance.as_ref().unwrap(), &instance));
        assert_eq!(observed[3].method.as_ref(), Some(&method));
        assert!(observed[3].failure.is_some());

        // after_test_class: (None, None, None)
        assert_eq!(observed[4].phase, Phase::AfterClass);
        assert!(observed[4].instance.is_none());
        assert!(observed[4].method.is_none());
        assert!(observed[4].failure.is_none());
    }
}

#[test]
fn the_class_identity_never_changes() {
    let record = InvocationRecord::new();
    let mut dispatcher = LifecycleDispatcher::with_listeners(
        ClassId::new("Constant"),
        [Box::new(RecordingListener::new("a", record)) as BoxListener],
    );

    assert_eq!(dispatcher.context().test_class().as_str(), "Constant");
    dispatcher.before_test_class().unwrap();
    dispatcher
        .prepare_test_instance(Some(Arc::new(()) as TestInstance))
        .unwrap();
    assert_eq!(dispatcher.context().test_class().as_str(), "Constant");
}

#[test]
fn attributes_flow_between_listeners_and_phases() {
    let writer = FnListener::named("writer").on_prepare_instance(|ctx| {
        ctx.set_attribute("db.url", Arc::new(String::from("postgres://test")));
        Ok(())
    });

    let seen = Arc::new(std::sync::Mutex::new(None::<String>));
    let seen_in = seen.clone();
    let reader = FnListener::named("reader").on_before_method(move |ctx| {
        let url = ctx
            .get_attribute("db.url")
            .and_then(|v| v.downcast::<String>().ok())
            .map(|v| (*v).clone());
        *seen_in.lock().unwrap() = url;
        Ok(())
    });

    let mut dispatcher = LifecycleDispatcher::with_listeners(
        ClassId::new("Attrs"),
        [Box::new(writer) as BoxListener, Box::new(reader)],
    );

    let instance: TestInstance = Arc::new(());
    dispatcher.prepare_test_instance(Some(instance.clone())).unwrap();
    dispatcher
        .before_test_method(Some(instance), MethodId::new("t"))
        .unwrap();

    assert_eq!(seen.lock().unwrap().as_deref(), Some("postgres://test"));
}
