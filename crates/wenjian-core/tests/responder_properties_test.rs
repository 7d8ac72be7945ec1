//! Integration test: classification and reply rendering through the public API.
//!
//! Covers rule precedence, case/width folding, empty input, idempotence and the
//! fixed-reply scenarios (greeting, fallback).

use wenjian_core::templates::{
    AUTHENTICATION_GUIDE, EMPTY_MESSAGE_REPLY, FALLBACK_REPLY, GREETING_REPLY,
};
use wenjian_core::{Category, ErrorKind, KnowledgeBase, Responder, RuleTable, Status};

fn labels_in_order(reply: &str, labels: &[&str]) -> bool {
    let mut from = 0;
    for label in labels {
        let needle = format!("**{}**: ", label);
        match reply[from..].find(&needle) {
            Some(pos) => from += pos + needle.len(),
            None => return false,
        }
    }
    true
}

fn category_labels(kb: &KnowledgeBase, name: &str) -> Vec<String> {
    kb.lookup(name)
        .unwrap()
        .iter()
        .map(|e| e.label.clone())
        .collect()
}

#[test]
fn every_ceramics_keyword_renders_ceramics_knowledge() {
    let responder = Responder::builtin();
    let labels = category_labels(responder.knowledge(), "青花瓷");
    let labels: Vec<&str> = labels.iter().map(String::as_str).collect();

    let table = RuleTable::builtin();
    let ceramics_rule = &table.rules()[0];
    assert_eq!(ceramics_rule.category, Category::Ceramics);

    for keyword in ceramics_rule.keywords() {
        let out = responder.respond(&format!("请问这件{}是什么年代的", keyword), "u1");
        assert_eq!(out.status, Status::Success);
        assert_eq!(out.category, Some(Category::Ceramics), "keyword {}", keyword);
        assert!(out.reply.starts_with("🏺 **青花瓷专业鉴定指南**"));
        assert!(labels_in_order(&out.reply, &labels), "keyword {}", keyword);
    }
}

#[test]
fn blank_messages_are_input_errors() {
    let responder = Responder::builtin();
    for message in ["", "   ", "\n\t", "\u{3000}"] {
        let out = responder.respond(message, "u1");
        assert_eq!(out.status, Status::Error);
        assert_eq!(out.error, Some(ErrorKind::Input));
        assert_eq!(out.reply, EMPTY_MESSAGE_REPLY);
        assert!(!out.reply.contains("鉴定指南"));
    }
}

#[test]
fn identical_calls_give_identical_replies() {
    let responder = Responder::builtin();
    for message in ["青花瓷", "你好", "随便说点什么", "鉴定"] {
        let a = responder.respond(message, "u1");
        let b = responder.respond(message, "u1");
        assert_eq!(a, b);
    }
}

#[test]
fn jade_beats_generic_authentication() {
    let out = Responder::builtin().respond("怎么鉴定这件古玉的年代", "u1");
    assert_eq!(out.category, Some(Category::Jade));
    assert!(out.reply.starts_with("💎 **玉器专业鉴定指南**"));
    assert_ne!(out.reply, AUTHENTICATION_GUIDE);
}

#[test]
fn generic_authentication_without_domain_keyword() {
    let out = Responder::builtin().respond("这个东西的真伪怎么判断", "u1");
    assert_eq!(out.category, Some(Category::Authentication));
    assert_eq!(out.reply, AUTHENTICATION_GUIDE);
}

#[test]
fn case_and_width_variants_classify_identically() {
    let responder = Responder::builtin();
    let plain = responder.respond("hello", "u1");
    for variant in ["HELLO", "HeLLo", "Ｈｅｌｌｏ"] {
        let out = responder.respond(variant, "u1");
        assert_eq!(out.category, plain.category, "variant {}", variant);
        assert_eq!(out.reply, plain.reply);
    }
    assert_eq!(
        responder.respond("青花瓷", "u1").category,
        responder.respond("  青花瓷  ", "u2").category
    );
}

#[test]
fn greeting_scenario() {
    let out = Responder::builtin().respond("你好", "u1");
    assert_eq!(out.status, Status::Success);
    assert_eq!(out.category, Some(Category::Greeting));
    assert_eq!(out.reply, GREETING_REPLY);
    assert!(out.reply.starts_with("👋 您好！我是文鉴通助手"));
    for domain in ["陶瓷类", "青铜器", "书画类", "玉器类"] {
        assert!(out.reply.contains(domain));
    }
}

#[test]
fn bronze_question_scenario() {
    let responder = Responder::builtin();
    let out = responder.respond("这件青铜器是真的吗", "u1");
    assert_eq!(out.category, Some(Category::Bronze));
    let labels = category_labels(responder.knowledge(), "青铜器");
    let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
    assert!(labels_in_order(&out.reply, &labels));
    assert!(out
        .reply
        .ends_with("💡 **温馨提示**: 青铜器鉴定要注意锈色的自然程度和铸造工艺。"));
}

#[test]
fn unmatched_message_gets_fallback_menu() {
    let out = Responder::builtin().respond("随便说点什么", "u1");
    assert_eq!(out.status, Status::Success);
    assert_eq!(out.category, None);
    assert_eq!(out.reply, FALLBACK_REPLY);
}

#[test]
fn user_id_does_not_affect_classification() {
    let responder = Responder::builtin();
    let a = responder.respond("字画", "alice");
    let b = responder.respond("字画", "hello-thanks-鉴定");
    assert_eq!(a.reply, b.reply);
    assert_eq!(a.category, Some(Category::Painting));
}

#[test]
fn responder_is_shareable_across_threads() {
    let responder = std::sync::Arc::new(Responder::builtin());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let responder = std::sync::Arc::clone(&responder);
            std::thread::spawn(move || responder.respond("玉石", &format!("u{}", i)).reply)
        })
        .collect();
    let replies: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(replies.windows(2).all(|w| w[0] == w[1]));
}
