//! Console routes, V2 action names and the closed enumerations used in payloads.

use crate::{Error, ErrorContext};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Legacy fine-tune routes.
pub const FINETUNE_CREATE_TASK_API: &str = "/wenxinworkshop/finetune/createTask";
pub const FINETUNE_CREATE_JOB_API: &str = "/wenxinworkshop/finetune/createJob";
pub const FINETUNE_GET_JOB_API: &str = "/wenxinworkshop/finetune/jobDetail";
pub const FINETUNE_STOP_JOB_API: &str = "/wenxinworkshop/finetune/stopJob";

/// Shared route of every V2 fine-tuning action.
pub const FINETUNE_V2_BASE_ROUTE_API: &str = "/v2/finetuning";

/// Query key selecting the V2 operation.
pub const CONSOLE_V2_ACTION_KEY: &str = "Action";

pub const FINETUNE_CREATE_JOB_ACTION: &str = "CreateFineTuningJob";
pub const FINETUNE_CREATE_TASK_ACTION: &str = "CreateFineTuningTask";
pub const FINETUNE_JOB_LIST_ACTION: &str = "DescribeFineTuningJobs";
pub const FINETUNE_TASK_LIST_ACTION: &str = "DescribeFineTuningTasks";
pub const FINETUNE_TASK_DETAIL_ACTION: &str = "DescribeFineTuningTask";
pub const FINETUNE_STOP_TASK_ACTION: &str = "StopFineTuningTask";
pub const FINETUNE_DELETE_TASK_ACTION: &str = "DeleteFineTuningTask";
pub const FINETUNE_DELETE_JOB_ACTION: &str = "DeleteFineTuningJob";
pub const FINETUNE_SUPPORTED_MODELS_ACTION: &str = "DescribeFineTuningSupportModels";

/// A closed set of string values sent verbatim on the wire.
pub trait WireEnum: Sized + Copy {
    /// Name used in error messages.
    const TYPE_NAME: &'static str;

    fn value(&self) -> &'static str;

    fn from_value(value: &str) -> Option<Self>;
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $value)] $variant, )+
        }

        impl WireEnum for $name {
            const TYPE_NAME: &'static str = stringify!($name);

            fn value(&self) -> &'static str {
                match self {
                    $( Self::$variant => $value, )+
                }
            }

            fn from_value(value: &str) -> Option<Self> {
                match value {
                    $( $value => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        impl $name {
            /// Wire value of this variant.
            pub fn value(&self) -> &'static str {
                <Self as WireEnum>::value(self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.value())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as WireEnum>::from_value(s).ok_or_else(|| {
                    Error::validation_with_context(
                        format!("unknown {} value '{}'", stringify!($name), s),
                        ErrorContext::new().with_source("consts"),
                    )
                })
            }
        }
    };
}

wire_enum! {
    /// Training strategy of a fine-tuning job.
    TrainMode {
        /// Supervised fine-tuning
        Sft => "SFT",
        PostPretrain => "PostPretrain",
        Dpo => "DPO",
        Kto => "KTO",
    }
}

wire_enum! {
    /// Sizing tier of a fine-tuning task.
    TrainParameterScale {
        FullFineTuning => "FullFineTuning",
        PromptTuning => "PromptTuning",
        LoRa => "LoRA",
    }
}

wire_enum! {
    /// Run state reported for a fine-tuning task.
    TrainStatus {
        Finish => "Done",
        Running => "Running",
        Fail => "Failed",
        Stop => "Stopped",
        Waiting => "Waiting",
    }
}

impl TrainStatus {
    /// Whether the task will not change state anymore.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finish | Self::Fail | Self::Stop)
    }
}

wire_enum! {
    /// Where a training dataset is stored.
    TrainDatasetSourceType {
        Platform => "Platform",
        PrivateBos => "Bos",
        PrivateAfs => "Afs",
    }
}

wire_enum! {
    FinetuneSupportModelType {
        Text2Text => "text2text",
        Text2Image => "text2image",
        ImageUnderstanding => "imageUnderstanding",
    }
}

wire_enum! {
    FinetuneSupportHyperParameterType {
        Int => "int",
        Float => "float",
        Boolean => "boolean",
        String => "string",
    }
}

wire_enum! {
    FinetuneSupportHyperParameterCheckType {
        Range => "range",
        Choice => "choice",
        MultipleChoice => "mult_choice",
    }
}

/// Mixed corpus used for data enhancement, sent as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FinetuneCorpusType {
    QianfanCommon = 1,
    YiyanCommon = 2,
    YiyanVertical = 3,
}

impl FinetuneCorpusType {
    pub fn value(&self) -> i64 {
        *self as i64
    }
}

impl From<FinetuneCorpusType> for serde_json::Value {
    fn from(corpus: FinetuneCorpusType) -> Self {
        serde_json::Value::from(corpus.value())
    }
}
