/// Assert that an envelope was applied to the cache
#[macro_export]
macro_rules! assert_applied {
    ($outcome:expr) => {
        assert_eq!(
            $outcome,
            cordial_client::Dispatched::Applied,
            "expected the envelope to be applied"
        );
    };
}

/// Assert that an envelope was parked instead of applied
#[macro_export]
macro_rules! assert_deferred {
    ($outcome:expr) => {
        assert_eq!(
            $outcome,
            cordial_client::Dispatched::Deferred,
            "expected the envelope to be deferred"
        );
    };
}

/// Assert that a preflight check stopped a request before it reached the
/// transport
#[macro_export]
macro_rules! assert_not_sent {
    ($test_client:expr) => {
        assert_eq!(
            $test_client.transport.call_count(),
            0,
            "request reached the transport: {:?}",
            $test_client.transport.last_request()
        );
    };
}

/// Assert that a list of events contains exactly the given variants, in order
#[macro_export]
macro_rules! assert_event_kinds {
    ($events:expr, [$($pattern:pat),* $(,)?]) => {{
        let events = &$events;
        let expected: &[&str] = &[$(stringify!($pattern)),*];
        assert_eq!(events.len(), expected.len(), "unexpected events: {:#?}", events);
        let mut index = 0;
        $(
            assert!(
                matches!(events[index], $pattern),
                "event {} was {:?}, expected {}",
                index,
                events[index],
                stringify!($pattern)
            );
            index += 1;
        )*
        let _ = index;
    }};
}
