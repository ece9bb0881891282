// src/services/knowledge_base.rs
//! Canned answers used when the chat backend is unavailable.

#[derive(Debug, PartialEq, Eq)]
pub struct Topic {
    /// Lowercase phrase looked for anywhere in the user's message.
    pub phrase: &'static str,
    pub response: &'static str,
}

impl Topic {
    fn matches(&self, lowered_input: &str) -> bool {
        lowered_input.contains(self.phrase)
    }
}

/// Checked top to bottom, first hit wins.
pub const TOPICS: &[Topic] = &[
    Topic {
        phrase: "shipping rates",
        response: "Shipping rates vary depending on factors such as package weight, dimensions, destination, and service level. For accurate rates, please use our Shipping Rates Calculator tool in the Tools section.",
    },
    Topic {
        phrase: "track shipment",
        response: "To track a shipment, you'll need the tracking number and carrier information. Please use our Shipment Tracker tool in the Tools section for real-time tracking updates.",
    },
    Topic {
        phrase: "trucking",
        response: "Trucking is a crucial part of logistics, involving the transportation of goods by road. It includes various types of services such as full truckload (FTL), less than truckload (LTL), and specialized freight.",
    },
    Topic {
        phrase: "freight forwarding",
        response: "Freight forwarding involves organizing shipments from the manufacturer or producer to the final point of distribution or consumer.",
    },
    Topic {
        phrase: "customs",
        response: "Customs procedures are essential for international shipping. They involve declaring goods, paying duties and taxes, and complying with import/export regulations.",
    },
    Topic {
        phrase: "packaging",
        response: "Proper packaging is crucial for protecting your items during shipping. Use appropriate materials like bubble wrap, packing peanuts, or air pillows.",
    },
    Topic {
        phrase: "insurance",
        response: "Shipping insurance provides protection against loss, damage, or theft of your packages.",
    },
    Topic {
        phrase: "international shipping",
        response: "International shipping involves additional considerations such as customs documentation, duties and taxes, restricted items, and longer transit times.",
    },
    Topic {
        phrase: "warehousing",
        response: "Warehousing is the storage of goods before they are shipped to customers.",
    },
    Topic {
        phrase: "last-mile delivery",
        response: "Last-mile delivery refers to the final step of the delivery process from a distribution center to the end customer.",
    },
];

pub const GENERIC_RESPONSE: &str = "I'm here to help with all your logistics needs, including shipping, trucking, and freight forwarding. Could you please provide more specific information about what you'd like to know? Feel free to ask about topics such as shipping rates, tracking, customs, packaging, insurance, or any other logistics-related questions.";

/// First topic whose phrase appears in `user_input`, ignoring case.
pub fn match_topic(user_input: &str) -> Option<&'static Topic> {
    let lowered = user_input.to_lowercase();
    TOPICS.iter().find(|topic| topic.matches(&lowered))
}

pub fn fallback(user_input: &str) -> &'static str {
    match_topic(user_input)
        .map(|topic| topic.response)
        .unwrap_or(GENERIC_RESPONSE)
}
