#![cfg(feature = "stream")]

use funclist_core::seq::Seq;
use futures_lite::{stream, StreamExt};

#[test]
fn cursor_is_a_stream() {
    spin_on::spin_on(async {
        let seq = Seq::from_iterator(1..=4).map(|i| i * 10);
        let items: Vec<i32> = StreamExt::map(seq.cursor(), |item| item.unwrap())
            .collect()
            .await;
        assert_eq!(items, vec![10, 20, 30, 40]);
        assert_eq!(seq.cached_len(), 4);
    });
}

#[test]
fn stream_sources_are_memoized() {
    let seq = Seq::from_stream(stream::iter(vec!["x", "y", "z"]));
    assert_eq!(seq.get(1).unwrap(), Some("y"));
    assert_eq!(seq.cached_len(), 2);
    assert_eq!(seq.to_string(), "[x, y, z]");

    spin_on::spin_on(async {
        let mut cursor = StreamExt::skip(seq.cursor(), 2);
        assert_eq!(cursor.next().await.map(|item| item.unwrap()), Some("z"));
        assert!(cursor.next().await.is_none());
    });
}
