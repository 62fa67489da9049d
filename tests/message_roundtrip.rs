use cmf_tx::{MessageBuilder, MessageParser, ParseEvent};

#[test]
fn concrete_vector_three_hex() {
    let mut b = MessageBuilder::new_owned();
    b.str(1, "F\u{f6}o").unwrap();
    b.bytes(200, b"hihi").unwrap();
    b.bool(3, true).unwrap();
    b.bool(40, false).unwrap();
    let bytes = b.into_inner();

    assert_eq!(hex::encode(&bytes), "0a0446c3b66ffb804804686968691cfd28");
}

#[test]
fn mixed_field_message_roundtrips() {
    let mut b = MessageBuilder::new_owned();
    b.u64(0, 0).unwrap();
    b.i64(1, -1).unwrap();
    b.i64(2, i64::MIN).unwrap();
    b.bytes(3, &[0xDE, 0xAD, 0xBE, 0xEF]).unwrap();
    b.str(4, "hello cmf").unwrap();
    b.bool(5, true).unwrap();
    b.bool(6, false).unwrap();
    b.u64(1000, 42).unwrap(); // forces an extended tag
    let bytes = b.into_inner();

    let mut p = MessageParser::new(&bytes);

    assert_eq!(p.next().unwrap(), ParseEvent::FoundTag);
    assert_eq!(p.tag(), 0);
    assert_eq!(p.data().unwrap().as_u64(), Some(0));

    assert_eq!(p.next().unwrap(), ParseEvent::FoundTag);
    assert_eq!(p.tag(), 1);
    assert_eq!(p.data().unwrap().as_i64(), Some(-1));

    assert_eq!(p.next().unwrap(), ParseEvent::FoundTag);
    assert_eq!(p.tag(), 2);
    assert_eq!(p.data().unwrap().as_i64(), Some(i64::MIN));

    assert_eq!(p.next().unwrap(), ParseEvent::FoundTag);
    assert_eq!(p.tag(), 3);
    assert_eq!(p.data().unwrap().as_bytes(), Some(&[0xDE, 0xAD, 0xBE, 0xEF][..]));

    assert_eq!(p.next().unwrap(), ParseEvent::FoundTag);
    assert_eq!(p.tag(), 4);
    assert_eq!(p.data().unwrap().as_str(), Some("hello cmf"));

    assert_eq!(p.next().unwrap(), ParseEvent::FoundTag);
    assert_eq!(p.tag(), 5);
    assert_eq!(p.data().unwrap().as_bool(), Some(true));

    assert_eq!(p.next().unwrap(), ParseEvent::FoundTag);
    assert_eq!(p.tag(), 6);
    assert_eq!(p.data().unwrap().as_bool(), Some(false));

    assert_eq!(p.next().unwrap(), ParseEvent::FoundTag);
    assert_eq!(p.tag(), 1000);
    assert_eq!(p.data().unwrap().as_u64(), Some(42));

    assert_eq!(p.next().unwrap(), ParseEvent::EndOfDocument);
}

#[test]
fn unknown_tags_are_skippable_without_a_schema() {
    let mut b = MessageBuilder::new_owned();
    b.bool(7, true).unwrap(); // not in any consumer's vocabulary
    b.u64(8, 999).unwrap();
    let bytes = b.into_inner();

    let mut p = MessageParser::new(&bytes);
    assert_eq!(p.next().unwrap(), ParseEvent::FoundTag);
    // A consumer that doesn't recognize tag 7 can skip the value entirely.
    let consumed_before = p.consumed();
    p.consume(0);
    assert_eq!(p.consumed(), consumed_before);

    assert_eq!(p.next().unwrap(), ParseEvent::FoundTag);
    assert_eq!(p.tag(), 8);
    assert_eq!(p.data().unwrap().as_u64(), Some(999));
}
