//! The feature grammar.
//!
//! Every block context (background, scenario, outline, examples) carries
//! its own terminators so closing callbacks fire before the next block
//! opens. Tag lines end the current block and park the parser in
//! [`State::FeatureBody`], or in [`State::AfterOutline`] where tags may
//! precede an `Examples:` header.

use super::{Action as A, Matcher as M, State as S, StateRows, Transition as T};

pub(super) static GRAMMAR: &[StateRows] = &[
    StateRows {
        state: S::Start,
        rows: &[
            T::new(M::Comment, &[A::Comment], S::Start),
            T::new(M::Tags, &[A::Tags], S::Start),
            T::new(M::Feature, &[A::StartFeature], S::Feature),
            T::new(M::EndOfInput, &[], S::End),
        ],
    },
    StateRows {
        state: S::Feature,
        rows: &[
            T::new(M::Comment, &[A::Comment], S::Feature),
            T::new(M::Tags, &[A::Tags], S::FeatureBody),
            T::new(M::Background, &[A::StartBackground], S::Background),
            T::new(M::Scenario, &[A::StartScenario], S::Scenario),
            T::new(M::Outline, &[A::StartOutline], S::Outline),
            T::new(M::EndOfInput, &[A::FinishFeature], S::End),
            T::new(M::Text, &[A::StartDescription, A::Data], S::Description),
        ],
    },
    StateRows {
        state: S::Description,
        rows: &[
            T::new(M::Comment, &[A::Comment], S::Description),
            T::new(M::Tags, &[A::FinishDescription, A::Tags], S::FeatureBody),
            T::new(
                M::Background,
                &[A::FinishDescription, A::StartBackground],
                S::Background,
            ),
            T::new(
                M::Scenario,
                &[A::FinishDescription, A::StartScenario],
                S::Scenario,
            ),
            T::new(
                M::Outline,
                &[A::FinishDescription, A::StartOutline],
                S::Outline,
            ),
            T::new(
                M::EndOfInput,
                &[A::FinishDescription, A::FinishFeature],
                S::End,
            ),
            T::new(M::Text, &[A::Data], S::Description),
        ],
    },
    StateRows {
        state: S::FeatureBody,
        rows: &[
            T::new(M::Comment, &[A::Comment], S::FeatureBody),
            T::new(M::Tags, &[A::Tags], S::FeatureBody),
            T::new(M::Background, &[A::StartBackground], S::Background),
            T::new(M::Scenario, &[A::StartScenario], S::Scenario),
            T::new(M::Outline, &[A::StartOutline], S::Outline),
            T::new(M::EndOfInput, &[A::FinishFeature], S::End),
        ],
    },
    // Background
    StateRows {
        state: S::Background,
        rows: &[
            T::new(M::Comment, &[A::Comment], S::Background),
            T::new(M::Step, &[A::StartStep], S::BackgroundStep),
            T::new(M::Tags, &[A::FinishBackground, A::Tags], S::FeatureBody),
            T::new(
                M::Background,
                &[A::FinishBackground, A::StartBackground],
                S::Background,
            ),
            T::new(
                M::Scenario,
                &[A::FinishBackground, A::StartScenario],
                S::Scenario,
            ),
            T::new(
                M::Outline,
                &[A::FinishBackground, A::StartOutline],
                S::Outline,
            ),
            T::new(
                M::EndOfInput,
                &[A::FinishBackground, A::FinishFeature],
                S::End,
            ),
        ],
    },
    StateRows {
        state: S::BackgroundStep,
        rows: &[
            T::new(M::Comment, &[A::Comment], S::BackgroundStep),
            T::new(
                M::Step,
                &[A::FinishStep, A::StartStep],
                S::BackgroundStep,
            ),
            T::new(
                M::MultilineOpen,
                &[A::StartMultiline],
                S::BackgroundMultiline,
            ),
            T::new(M::TableRow, &[A::StartHash], S::BackgroundTable),
            T::new(
                M::Tags,
                &[A::FinishStep, A::FinishBackground, A::Tags],
                S::FeatureBody,
            ),
            T::new(
                M::Background,
                &[A::FinishStep, A::FinishBackground, A::StartBackground],
                S::Background,
            ),
            T::new(
                M::Scenario,
                &[A::FinishStep, A::FinishBackground, A::StartScenario],
                S::Scenario,
            ),
            T::new(
                M::Outline,
                &[A::FinishStep, A::FinishBackground, A::StartOutline],
                S::Outline,
            ),
            T::new(
                M::EndOfInput,
                &[A::FinishStep, A::FinishBackground, A::FinishFeature],
                S::End,
            ),
        ],
    },
    StateRows {
        state: S::BackgroundMultiline,
        rows: &[
            T::new(
                M::MultilineClose,
                &[A::FinishMultiline, A::FinishStep],
                S::Background,
            ),
            T::new(
                M::MultilineContent,
                &[A::MultilineData],
                S::BackgroundMultiline,
            ),
        ],
    },
    StateRows {
        state: S::BackgroundTable,
        rows: &[
            T::new(M::Comment, &[A::Comment], S::BackgroundTable),
            T::new(M::TableRow, &[A::HashData], S::BackgroundTable),
            T::new(
                M::Step,
                &[A::FinishHash, A::FinishStep, A::StartStep],
                S::BackgroundStep,
            ),
            T::new(
                M::Tags,
                &[A::FinishHash, A::FinishStep, A::FinishBackground, A::Tags],
                S::FeatureBody,
            ),
            T::new(
                M::Background,
                &[
                    A::FinishHash,
                    A::FinishStep,
                    A::FinishBackground,
                    A::StartBackground,
                ],
                S::Background,
            ),
            T::new(
                M::Scenario,
                &[
                    A::FinishHash,
                    A::FinishStep,
                    A::FinishBackground,
                    A::StartScenario,
                ],
                S::Scenario,
            ),
            T::new(
                M::Outline,
                &[
                    A::FinishHash,
                    A::FinishStep,
                    A::FinishBackground,
                    A::StartOutline,
                ],
                S::Outline,
            ),
            T::new(
                M::EndOfInput,
                &[
                    A::FinishHash,
                    A::FinishStep,
                    A::FinishBackground,
                    A::FinishFeature,
                ],
                S::End,
            ),
        ],
    },
    // Scenario
    StateRows {
        state: S::Scenario,
        rows: &[
            T::new(M::Comment, &[A::Comment], S::Scenario),
            T::new(M::Step, &[A::StartStep], S::ScenarioStep),
            T::new(M::Tags, &[A::FinishScenario, A::Tags], S::FeatureBody),
            T::new(
                M::Background,
                &[A::FinishScenario, A::StartBackground],
                S::Background,
            ),
            T::new(
                M::Scenario,
                &[A::FinishScenario, A::StartScenario],
                S::Scenario,
            ),
            T::new(
                M::Outline,
                &[A::FinishScenario, A::StartOutline],
                S::Outline,
            ),
            T::new(
                M::EndOfInput,
                &[A::FinishScenario, A::FinishFeature],
                S::End,
            ),
        ],
    },
    StateRows {
        state: S::ScenarioStep,
        rows: &[
            T::new(M::Comment, &[A::Comment], S::ScenarioStep),
            T::new(M::Step, &[A::FinishStep, A::StartStep], S::ScenarioStep),
            T::new(
                M::MultilineOpen,
                &[A::StartMultiline],
                S::ScenarioMultiline,
            ),
            T::new(M::TableRow, &[A::StartHash], S::ScenarioTable),
            T::new(
                M::Tags,
                &[A::FinishStep, A::FinishScenario, A::Tags],
                S::FeatureBody,
            ),
            T::new(
                M::Background,
                &[A::FinishStep, A::FinishScenario, A::StartBackground],
                S::Background,
            ),
            T::new(
                M::Scenario,
                &[A::FinishStep, A::FinishScenario, A::StartScenario],
                S::Scenario,
            ),
            T::new(
                M::Outline,
                &[A::FinishStep, A::FinishScenario, A::StartOutline],
                S::Outline,
            ),
            T::new(
                M::EndOfInput,
                &[A::FinishStep, A::FinishScenario, A::FinishFeature],
                S::End,
            ),
        ],
    },
    StateRows {
        state: S::ScenarioMultiline,
        rows: &[
            T::new(
                M::MultilineClose,
                &[A::FinishMultiline, A::FinishStep],
                S::Scenario,
            ),
            T::new(
                M::MultilineContent,
                &[A::MultilineData],
                S::ScenarioMultiline,
            ),
        ],
    },
    StateRows {
        state: S::ScenarioTable,
        rows: &[
            T::new(M::Comment, &[A::Comment], S::ScenarioTable),
            T::new(M::TableRow, &[A::HashData], S::ScenarioTable),
            T::new(
                M::Step,
                &[A::FinishHash, A::FinishStep, A::StartStep],
                S::ScenarioStep,
            ),
            T::new(
                M::Tags,
                &[A::FinishHash, A::FinishStep, A::FinishScenario, A::Tags],
                S::FeatureBody,
            ),
            T::new(
                M::Background,
                &[
                    A::FinishHash,
                    A::FinishStep,
                    A::FinishScenario,
                    A::StartBackground,
                ],
                S::Background,
            ),
            T::new(
                M::Scenario,
                &[
                    A::FinishHash,
                    A::FinishStep,
                    A::FinishScenario,
                    A::StartScenario,
                ],
                S::Scenario,
            ),
            T::new(
                M::Outline,
                &[
                    A::FinishHash,
                    A::FinishStep,
                    A::FinishScenario,
                    A::StartOutline,
                ],
                S::Outline,
            ),
            T::new(
                M::EndOfInput,
                &[
                    A::FinishHash,
                    A::FinishStep,
                    A::FinishScenario,
                    A::FinishFeature,
                ],
                S::End,
            ),
        ],
    },
    // Scenario Outline
    StateRows {
        state: S::Outline,
        rows: &[
            T::new(M::Comment, &[A::Comment], S::Outline),
            T::new(M::Step, &[A::StartStep], S::OutlineStep),
            T::new(
                M::Examples,
                &[A::FinishOutline, A::StartExamples],
                S::Examples,
            ),
            T::new(M::Tags, &[A::FinishOutline, A::Tags], S::AfterOutline),
            T::new(
                M::Background,
                &[A::FinishOutline, A::StartBackground],
                S::Background,
            ),
            T::new(
                M::Scenario,
                &[A::FinishOutline, A::StartScenario],
                S::Scenario,
            ),
            T::new(
                M::Outline,
                &[A::FinishOutline, A::StartOutline],
                S::Outline,
            ),
            T::new(
                M::EndOfInput,
                &[A::FinishOutline, A::FinishFeature],
                S::End,
            ),
        ],
    },
    StateRows {
        state: S::OutlineStep,
        rows: &[
            T::new(M::Comment, &[A::Comment], S::OutlineStep),
            T::new(M::Step, &[A::FinishStep, A::StartStep], S::OutlineStep),
            T::new(
                M::MultilineOpen,
                &[A::StartMultiline],
                S::OutlineMultiline,
            ),
            T::new(M::TableRow, &[A::StartHash], S::OutlineTable),
            T::new(
                M::Examples,
                &[A::FinishStep, A::FinishOutline, A::StartExamples],
                S::Examples,
            ),
            T::new(
                M::Tags,
                &[A::FinishStep, A::FinishOutline, A::Tags],
                S::AfterOutline,
            ),
            T::new(
                M::Background,
                &[A::FinishStep, A::FinishOutline, A::StartBackground],
                S::Background,
            ),
            T::new(
                M::Scenario,
                &[A::FinishStep, A::FinishOutline, A::StartScenario],
                S::Scenario,
            ),
            T::new(
                M::Outline,
                &[A::FinishStep, A::FinishOutline, A::StartOutline],
                S::Outline,
            ),
            T::new(
                M::EndOfInput,
                &[A::FinishStep, A::FinishOutline, A::FinishFeature],
                S::End,
            ),
        ],
    },
    StateRows {
        state: S::OutlineMultiline,
        rows: &[
            T::new(
                M::MultilineClose,
                &[A::FinishMultiline, A::FinishStep],
                S::Outline,
            ),
            T::new(
                M::MultilineContent,
                &[A::MultilineData],
                S::OutlineMultiline,
            ),
        ],
    },
    StateRows {
        state: S::OutlineTable,
        rows: &[
            T::new(M::Comment, &[A::Comment], S::OutlineTable),
            T::new(M::TableRow, &[A::HashData], S::OutlineTable),
            T::new(
                M::Step,
                &[A::FinishHash, A::FinishStep, A::StartStep],
                S::OutlineStep,
            ),
            T::new(
                M::Examples,
                &[
                    A::FinishHash,
                    A::FinishStep,
                    A::FinishOutline,
                    A::StartExamples,
                ],
                S::Examples,
            ),
            T::new(
                M::Tags,
                &[A::FinishHash, A::FinishStep, A::FinishOutline, A::Tags],
                S::AfterOutline,
            ),
            T::new(
                M::Background,
                &[
                    A::FinishHash,
                    A::FinishStep,
                    A::FinishOutline,
                    A::StartBackground,
                ],
                S::Background,
            ),
            T::new(
                M::Scenario,
                &[
                    A::FinishHash,
                    A::FinishStep,
                    A::FinishOutline,
                    A::StartScenario,
                ],
                S::Scenario,
            ),
            T::new(
                M::Outline,
                &[
                    A::FinishHash,
                    A::FinishStep,
                    A::FinishOutline,
                    A::StartOutline,
                ],
                S::Outline,
            ),
            T::new(
                M::EndOfInput,
                &[
                    A::FinishHash,
                    A::FinishStep,
                    A::FinishOutline,
                    A::FinishFeature,
                ],
                S::End,
            ),
        ],
    },
    StateRows {
        state: S::AfterOutline,
        rows: &[
            T::new(M::Comment, &[A::Comment], S::AfterOutline),
            T::new(M::Tags, &[A::Tags], S::AfterOutline),
            T::new(M::Examples, &[A::StartExamples], S::Examples),
            T::new(M::Background, &[A::StartBackground], S::Background),
            T::new(M::Scenario, &[A::StartScenario], S::Scenario),
            T::new(M::Outline, &[A::StartOutline], S::Outline),
            T::new(M::EndOfInput, &[A::FinishFeature], S::End),
        ],
    },
    // Examples
    StateRows {
        state: S::Examples,
        rows: &[
            T::new(M::Comment, &[A::Comment], S::Examples),
            T::new(M::TableRow, &[A::StartHash], S::ExamplesTable),
        ],
    },
    StateRows {
        state: S::ExamplesTable,
        rows: &[
            T::new(M::Comment, &[A::Comment], S::ExamplesTable),
            T::new(M::TableRow, &[A::HashData], S::ExamplesTable),
            T::new(
                M::Examples,
                &[A::FinishHash, A::FinishExamples, A::StartExamples],
                S::Examples,
            ),
            T::new(
                M::Tags,
                &[A::FinishHash, A::FinishExamples, A::Tags],
                S::AfterOutline,
            ),
            T::new(
                M::Background,
                &[A::FinishHash, A::FinishExamples, A::StartBackground],
                S::Background,
            ),
            T::new(
                M::Scenario,
                &[A::FinishHash, A::FinishExamples, A::StartScenario],
                S::Scenario,
            ),
            T::new(
                M::Outline,
                &[A::FinishHash, A::FinishExamples, A::StartOutline],
                S::Outline,
            ),
            T::new(
                M::EndOfInput,
                &[A::FinishHash, A::FinishExamples, A::FinishFeature],
                S::End,
            ),
        ],
    },
];
