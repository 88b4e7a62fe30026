use prova::testing::{InvocationRecord, RecordingListener};
use prova::{
    BoxListener, CachingContextFactory, ClassId, ContextCache, LifecycleDispatcher,
    PlainContextFactory, StaticResolver, TestInstance,
};
use std::sync::Arc;

#[test]
fn construction_seeds_the_registry_from_the_resolver() {
    let record = InvocationRecord::new();
    let record_a = record.clone();
    let record_b = record.clone();
    let resolver = StaticResolver::new()
        .with(move || RecordingListener::new("resolved-a", record_a.clone()))
        .with(move || RecordingListener::new("resolved-b", record_b.clone()));

    let mut dispatcher =
        LifecycleDispatcher::new(ClassId::new("Resolved"), &resolver, &PlainContextFactory);

    assert_eq!(dispatcher.listeners().len(), 2);
    assert_eq!(dispatcher.context().test_class().as_str(), "Resolved");

    dispatcher.before_test_class().unwrap();
    assert_eq!(record.labels(), ["resolved-a", "resolved-b"]);
}

#[test]
fn listeners_registered_between_phases_join_later_traversals() {
    let record = InvocationRecord::new();
    let mut dispatcher = LifecycleDispatcher::with_listeners(
        ClassId::new("Late"),
        [Box::new(RecordingListener::new("early", record.clone())) as BoxListener],
    );

    dispatcher.before_test_class().unwrap();
    assert_eq!(record.labels(), ["early"]);
    record.clear();

    dispatcher.register_listener(RecordingListener::new("late", record.clone()));
    let instance: TestInstance = Arc::new(());
    dispatcher.prepare_test_instance(Some(instance)).unwrap();

    assert_eq!(record.labels(), ["early", "late"]);
}

#[test]
fn the_live_registry_can_be_reordered_between_executions() {
    let record = InvocationRecord::new();
    let mut dispatcher = LifecycleDispatcher::with_listeners(
        ClassId::new("Reorder"),
        [
            Box::new(RecordingListener::new("a", record.clone())) as BoxListener,
            Box::new(RecordingListener::new("b", record.clone())),
        ],
    );

    dispatcher.before_test_class().unwrap();
    assert_eq!(record.labels(), ["a", "b"]);
    record.clear();

    dispatcher.listeners_mut().as_mut_slice().swap(0, 1);
    dispatcher.before_test_class().unwrap();
    assert_eq!(record.labels(), ["b", "a"]);
}

#[test]
fn register_listeners_appends_in_the_given_order() {
    let record = InvocationRecord::new();
    let mut dispatcher = LifecycleDispatcher::with_listeners(ClassId::new("Batch"), []);

    dispatcher.register_listeners([
        Box::new(RecordingListener::new("one", record.clone())) as BoxListener,
        Box::new(RecordingListener::new("two", record.clone())),
        Box::new(RecordingListener::new("three", record.clone())),
    ]);

    dispatcher.before_test_class().unwrap();
    assert_eq!(record.labels(), ["one", "two", "three"]);
}

#[test]
fn a_caching_factory_seeds_the_dispatcher_context() {
    let cache = ContextCache::new();
    let class = ClassId::new("Cached");
    cache.insert(class.clone(), "suite.tag", Arc::new(String::from("smoke")));
    let factory = CachingContextFactory::new(cache.clone());

    let dispatcher = LifecycleDispatcher::new(class, &StaticResolver::new(), &factory);

    let tag = dispatcher.context().get_attribute("suite.tag").unwrap();
    assert_eq!(*tag.downcast::<String>().unwrap(), "smoke");

    // The cache is an explicit value with its own lifecycle.
    cache.clear();
    let fresh = LifecycleDispatcher::new(ClassId::new("Cached"), &StaticResolver::new(), &factory);
    assert!(fresh.context().get_attribute("suite.tag").is_none());
}
