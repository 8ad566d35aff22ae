//! Agent Pipeline Tests
//!
//! End-to-end tests for the dialogue pipeline: classification, context
//! merge precedence, entity extraction, and composed replies.

use crate::agent::{
    extract, ActionKind, ConversationContext, DocumentKind, Intent, IntentClassifier, StudyAgent,
};

mod classifier_properties {
    use super::*;

    #[test]
    fn test_pyq_terms_always_win() {
        let classifier = IntentClassifier::new();

        let inputs = vec![
            "pyq",
            "Analyze PYQ for Physics",
            "previous year questions for maths",
            "what do past paper trends look like", // "what" would match Question later
        ];

        for input in inputs {
            assert_eq!(
                classifier.classify(input),
                Intent::Pyq,
                "Expected Pyq for '{}'",
                input
            );
        }
    }

    #[test]
    fn test_document_terms_set_kind_with_precedence() {
        let classifier = IntentClassifier::new();

        let cases = vec![
            ("Create a PDF about gravity", DocumentKind::Pdf),
            ("I want a word file on gravity", DocumentKind::Word),
            ("make a ppt on gravity", DocumentKind::Ppt),
            ("a powerpoint presentation in word style", DocumentKind::Ppt),
            ("generate a doc for my class", DocumentKind::Word),
            ("generate a report for my class", DocumentKind::Pdf),
        ];

        for (input, kind) in cases {
            assert_eq!(
                classifier.classify(input),
                Intent::Document,
                "Expected Document for '{}'",
                input
            );
            assert_eq!(
                DocumentKind::detect(input),
                kind,
                "Wrong kind for '{}'",
                input
            );
        }
    }

    #[test]
    fn test_question_words_and_default() {
        let classifier = IntentClassifier::new();

        assert_eq!(classifier.classify("why is the sky blue"), Intent::Question);
        assert_eq!(classifier.classify("??"), Intent::Question);
        assert_eq!(classifier.classify("good morning"), Intent::Help);
    }
}

mod context_precedence {
    use super::*;

    #[test]
    fn test_pending_document_captures_any_input() {
        let agent = StudyAgent::new();
        let ctx = ConversationContext::awaiting_details(DocumentKind::Pdf);

        // Each of these would classify as a different intent on its own.
        let inputs = vec![
            "Analyze PYQ for Physics",
            "summarize my notes",
            "what is gravity?",
            "plain free text details",
        ];

        for input in inputs {
            let reply = agent.respond(input, &ctx);
            let action = reply
                .action
                .unwrap_or_else(|| panic!("Expected action for '{}'", input));
            assert_eq!(action.kind, ActionKind::DownloadPdf);
            assert_eq!(action.payload.content, input);
            assert!(reply.new_context.details_provided());
        }
    }

    #[test]
    fn test_captured_details_preserve_document_kind() {
        let agent = StudyAgent::new();

        let first = agent.respond("ppt please", &ConversationContext::new());
        assert!(first.new_context.is_awaiting_details());
        assert_eq!(first.new_context.document_kind(), Some(DocumentKind::Ppt));

        let second = agent.respond("The Water Cycle", &first.new_context);
        assert_eq!(
            second.action.expect("details supplied").kind,
            ActionKind::DownloadPpt
        );
    }

    #[test]
    fn test_ready_flow_does_not_recapture() {
        let agent = StudyAgent::new();

        let first = agent.respond(
            "Create a PDF about Machine Learning basics.",
            &ConversationContext::new(),
        );
        assert!(first.new_context.details_provided());

        // Details are provided, so the next turn is classified normally.
        let second = agent.respond("Analyze PYQ for Physics", &first.new_context);
        assert!(second.action.is_none());
        assert!(second.text.contains("Physics"));
    }

    #[test]
    fn test_context_replaced_wholesale_each_turn() {
        let agent = StudyAgent::new();
        let ctx = ConversationContext::for_intent(Intent::Summary);

        // A stateless turn resets the context entirely.
        let reply = agent.respond("Explain photosynthesis", &ctx);
        assert_eq!(reply.new_context, ConversationContext::new());
    }
}

mod extraction {
    use super::*;

    #[test]
    fn test_title_is_pre_period_topic() {
        assert_eq!(
            extract::extract_title("Create a PDF about Machine Learning basics."),
            "Machine Learning basics"
        );
    }

    #[test]
    fn test_sections_default_without_keywords() {
        assert_eq!(
            extract::extract_sections("a pdf on thermodynamics please"),
            vec!["Introduction", "Main Content", "Conclusion"]
        );
    }

    #[test]
    fn test_sections_split_on_separators() {
        let sections = extract::extract_sections("sections: A, B; C");
        assert_eq!(sections, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_subject_vocabulary() {
        for (input, expected) in [
            ("pyq for biology please", "Biology"),
            ("History pyq", "History"),
            ("computer science pyq", "Computer"),
        ] {
            assert_eq!(extract::extract_subject(input), expected);
        }
    }
}

mod composition {
    use super::*;

    #[test]
    fn test_identical_inputs_identical_output() {
        let agent = StudyAgent::new();

        for (text, ctx) in [
            ("Create a PDF about gravity basics", ConversationContext::new()),
            ("free text", ConversationContext::awaiting_details(DocumentKind::Word)),
            ("Analyze PYQ for Chemistry", ConversationContext::new()),
        ] {
            let a = agent.respond(text, &ctx);
            let b = agent.respond(text, &ctx);
            assert_eq!(a, b, "compose must be pure for '{}'", text);
        }
    }

    #[test]
    fn test_every_intent_has_a_reply() {
        let agent = StudyAgent::new();
        let ctx = ConversationContext::new();

        let inputs = vec![
            "pyq for physics",
            "create a pdf",
            "summarize this",
            "draw a diagram",
            "what is entropy?",
            "blah",
        ];

        for input in inputs {
            let reply = agent.respond(input, &ctx);
            assert!(!reply.text.is_empty(), "Empty reply for '{}'", input);
        }
    }

    #[test]
    fn test_action_payload_round_trips_as_json() {
        let agent = StudyAgent::new();
        let reply = agent.respond(
            "Create a PDF about Machine Learning basics.",
            &ConversationContext::new(),
        );

        let action = reply.action.expect("ready flow has an action");
        let json = serde_json::to_string(&action).expect("serializes");
        assert!(json.contains("download_pdf"));

        let back: crate::agent::ActionDescriptor =
            serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, action);
    }
}
