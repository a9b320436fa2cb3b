//! The menu tree and the offline responses that back it.
//!
//! Every action carries the chat prompt sent to the generator. Every
//! action also needs an entry in [`OFFLINE`] so a receipt can still be
//! printed when generation fails.

use crate::generation::{Message, Prompt, Role};
use crate::menu::MenuNode;
use crate::offline::{OfflineEntry, OfflineLibrary};

pub type Node = MenuNode<'static, Prompt>;

const SYSTEM: Message = Message {
    role: Role::System,
    content: "You are Bad AI, a sarcastic fortune teller living in a box. \
              Answer in at most three short sentences. No emoji.",
};

const INSULTS: &[Node] = &[
    MenuNode::action(
        "Shakespeare",
        Prompt {
            messages: &[
                SYSTEM,
                Message {
                    role: Role::User,
                    content: "Insult me in the style of Shakespeare.",
                },
            ],
        },
    ),
    MenuNode::action(
        "Roast",
        Prompt {
            messages: &[
                SYSTEM,
                Message {
                    role: Role::User,
                    content: "Give me a light-hearted roast a friend would laugh at.",
                },
            ],
        },
    ),
    MenuNode::action(
        "Compliment(negated)",
        Prompt {
            messages: &[
                SYSTEM,
                Message {
                    role: Role::User,
                    content: "Give me a compliment that turns into an insult halfway through.",
                },
            ],
        },
    ),
];

const BAD_ADVICE: &[Node] = &[
    MenuNode::action(
        "Life Choices",
        Prompt {
            messages: &[
                SYSTEM,
                Message {
                    role: Role::User,
                    content: "Give me confidently terrible advice about life choices.",
                },
            ],
        },
    ),
    MenuNode::action(
        "Money",
        Prompt {
            messages: &[
                SYSTEM,
                Message {
                    role: Role::User,
                    content: "Give me hilariously bad financial advice.",
                },
            ],
        },
    ),
    MenuNode::action(
        "Relationships",
        Prompt {
            messages: &[
                SYSTEM,
                Message {
                    role: Role::User,
                    content: "Give me absurd relationship advice nobody should follow.",
                },
            ],
        },
    ),
];

const FORTUNES: &[Node] = &[
    MenuNode::action(
        "Fortune Cookie",
        Prompt {
            messages: &[
                SYSTEM,
                Message {
                    role: Role::User,
                    content: "Write an ominous but silly fortune cookie message.",
                },
            ],
        },
    ),
    MenuNode::action(
        "Horoscope",
        Prompt {
            messages: &[
                SYSTEM,
                Message {
                    role: Role::User,
                    content: "Write today's horoscope for a random, made-up star sign.",
                },
            ],
        },
    ),
    MenuNode::action(
        "Prophecy",
        Prompt {
            messages: &[
                SYSTEM,
                Message {
                    role: Role::User,
                    content: "Make a dramatic prophecy about something mundane.",
                },
            ],
        },
    ),
];

const EXCUSES: &[Node] = &[
    MenuNode::action(
        "Being Late",
        Prompt {
            messages: &[
                SYSTEM,
                Message {
                    role: Role::User,
                    content: "Give me an unbelievable excuse for being late.",
                },
            ],
        },
    ),
    MenuNode::action(
        "Homework",
        Prompt {
            messages: &[
                SYSTEM,
                Message {
                    role: Role::User,
                    content: "Give me a creative excuse for not doing my homework.",
                },
            ],
        },
    ),
    MenuNode::action(
        "Skipping Work",
        Prompt {
            messages: &[
                SYSTEM,
                Message {
                    role: Role::User,
                    content: "Give me a far-fetched excuse for skipping work today.",
                },
            ],
        },
    ),
];

/// Top level of the menu.
pub static MENU: &[Node] = &[
    MenuNode::group("Insults", INSULTS),
    MenuNode::group("Bad Advice", BAD_ADVICE),
    MenuNode::group("Fortunes", FORTUNES),
    MenuNode::group("Excuses", EXCUSES),
];

pub static OFFLINE: OfflineLibrary<'static> = OfflineLibrary::new(&[
    OfflineEntry {
        key: "insults/shakespeare",
        responses: &[
            "Thou art a boil, a plague sore, an embossed carbuncle.",
            "Away, you starvelling, you eel-skin, you dried neat's-tongue!",
            "Thy wit is as thick as Tewkesbury mustard.",
        ],
    },
    OfflineEntry {
        key: "insults/roast",
        responses: &[
            "You have the confidence of a printer that says it's ready.",
            "Your playlist has more skips than your gym membership.",
            "You bring everyone so much joy. When you leave.",
        ],
    },
    OfflineEntry {
        key: "insults/compliment(negated)",
        responses: &[
            "You have a great face for radio.",
            "You're a natural leader. Of people who are lost.",
            "Your cooking is unforgettable, no matter how hard we try.",
        ],
    },
    OfflineEntry {
        key: "bad_advice/life_choices",
        responses: &[
            "Never make a decision today that you can panic about tomorrow.",
            "If at first you don't succeed, redefine success.",
            "Always take the stairs. Especially the escalator.",
        ],
    },
    OfflineEntry {
        key: "bad_advice/money",
        responses: &[
            "Buy high, sell low. Volume makes up for it.",
            "Save money by never checking your balance.",
            "Invest everything in the first coin you hear about at a party.",
        ],
    },
    OfflineEntry {
        key: "bad_advice/relationships",
        responses: &[
            "Communication is key, so communicate only in riddles.",
            "Win every argument by leaving the room and never returning.",
            "Always remember their birthday. Forget yours to balance it out.",
        ],
    },
    OfflineEntry {
        key: "fortunes/fortune_cookie",
        responses: &[
            "Help! I am trapped in a fortune cookie factory.",
            "You will find what you seek in the last place you look.",
            "A thrilling time is in your immediate future. It is lunch.",
        ],
    },
    OfflineEntry {
        key: "fortunes/horoscope",
        responses: &[
            "Stapleus: Mercury is in retrograde. So is your laundry.",
            "Toastarius: Avoid bread-related decisions until Thursday.",
            "Socktopus: A missing sock will return, but changed.",
        ],
    },
    OfflineEntry {
        key: "fortunes/prophecy",
        responses: &[
            "When the kettle boils thrice, the milk shall be off.",
            "A great darkness approaches. Charge your phone.",
            "The chosen one will find the TV remote. It is not you.",
        ],
    },
    OfflineEntry {
        key: "excuses/being_late",
        responses: &[
            "A goose declared my driveway sovereign territory.",
            "My clock is set to a more ambitious time zone.",
            "I was early for yesterday's meeting and lost track.",
        ],
    },
    OfflineEntry {
        key: "excuses/homework",
        responses: &[
            "It was confiscated as evidence by the cat.",
            "I finished it, but it achieved sentience and left.",
            "I did it in invisible ink to save paper.",
        ],
    },
    OfflineEntry {
        key: "excuses/skipping_work",
        responses: &[
            "I'm working from home. My home is the beach.",
            "My computer needs emotional support after the update.",
            "I have to wait in for a package that may never come.",
        ],
    },
]);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LCD_COLUMNS, PRINTER_LINE_WIDTH};

    fn actions() -> impl Iterator<Item = (&'static str, &'static Node)> {
        MENU.iter()
            .flat_map(|group| group.children().iter().map(move |node| (group.title(), node)))
    }

    #[test]
    fn every_action_has_offline_responses() {
        for (topic, node) in actions() {
            let responses = OFFLINE.responses(topic, node.title());
            assert!(
                responses.is_some_and(|r| !r.is_empty()),
                "no offline responses for {topic}/{}",
                node.title()
            );
        }
    }

    #[test]
    fn tree_is_two_levels_of_groups_and_actions() {
        for group in MENU {
            assert!(group.is_group());
            assert!(!group.children().is_empty());
            for node in group.children() {
                assert!(matches!(node, MenuNode::Action { .. }));
            }
        }
    }

    #[test]
    fn prompts_start_with_the_system_message() {
        for (_, node) in actions() {
            let MenuNode::Action { payload, .. } = node else {
                unreachable!()
            };
            assert_eq!(payload.messages.first(), Some(&SYSTEM));
            assert_eq!(payload.messages.last().map(|m| m.role), Some(Role::User));
        }
    }

    #[test]
    fn titles_fit_the_option_width() {
        let width = (LCD_COLUMNS - 1) as usize;
        for (topic, node) in actions() {
            assert!(topic.chars().count() <= width, "{topic}");
            assert!(node.title().chars().count() <= width, "{}", node.title());
        }
    }

    #[test]
    fn offline_responses_are_printable_ascii() {
        for (topic, node) in actions() {
            for response in OFFLINE.responses(topic, node.title()).unwrap_or_default() {
                assert!(response.is_ascii(), "{response}");
                assert!(response.len() < 4 * PRINTER_LINE_WIDTH);
            }
        }
    }
}
