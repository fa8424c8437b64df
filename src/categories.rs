// src/categories.rs

use serde::Serialize;

/// Health topic a message is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Fever,
    Headache,
    Diabetes,
    BloodPressure,
    Cardiac,
    ColdFlu,
    Wellness,
    MentalHealth,
    Medication,
    Allergy,
    General,
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Topic::Fever => "fever",
            Topic::Headache => "headache",
            Topic::Diabetes => "diabetes",
            Topic::BloodPressure => "blood_pressure",
            Topic::Cardiac => "cardiac",
            Topic::ColdFlu => "cold_flu",
            Topic::Wellness => "wellness",
            Topic::MentalHealth => "mental_health",
            Topic::Medication => "medication",
            Topic::Allergy => "allergy",
            Topic::General => "general",
        };
        f.write_str(name)
    }
}

/// A keyword set mapped to one canned answer.
#[derive(Debug)]
pub struct Category {
    pub topic: Topic,
    /// Lower-case substrings; any one of them selects the category.
    pub keywords: &'static [&'static str],
    pub response: &'static str,
}

impl Category {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// Reply used when there is nothing to match against.
pub const EMPTY_MESSAGE_RESPONSE: &str =
    "Please ask me a health-related question and I'll do my best to help!";

/// Categories in priority order; the first match wins.
pub static CATEGORIES: [Category; 10] = [
    Category {
        topic: Topic::Fever,
        keywords: &["fever", "temperature", "hot", "chills"],
        response: FEVER,
    },
    Category {
        topic: Topic::Headache,
        keywords: &["headache", "head pain", "migraine"],
        response: HEADACHE,
    },
    Category {
        topic: Topic::Diabetes,
        keywords: &["diabetes", "blood sugar", "insulin"],
        response: DIABETES,
    },
    Category {
        topic: Topic::BloodPressure,
        keywords: &["blood pressure", "hypertension", "high pressure"],
        response: BLOOD_PRESSURE,
    },
    Category {
        topic: Topic::Cardiac,
        keywords: &["chest pain", "heart", "cardiac"],
        response: CARDIAC,
    },
    Category {
        topic: Topic::ColdFlu,
        keywords: &["cold", "flu", "cough", "sore throat", "runny nose"],
        response: COLD_FLU,
    },
    Category {
        topic: Topic::Wellness,
        keywords: &["wellness", "healthy", "prevention", "diet", "exercise"],
        response: WELLNESS,
    },
    Category {
        topic: Topic::MentalHealth,
        keywords: &["anxiety", "depression", "stress", "mental health"],
        response: MENTAL_HEALTH,
    },
    Category {
        topic: Topic::Medication,
        keywords: &["medication", "medicine", "drug", "prescription"],
        response: MEDICATION,
    },
    Category {
        topic: Topic::Allergy,
        keywords: &["allergy", "allergic", "rash", "hives"],
        response: ALLERGY,
    },
];

/// Catch-all for messages no keyword set claims.
pub static DEFAULT_CATEGORY: Category = Category {
    topic: Topic::General,
    keywords: &[],
    response: GENERAL,
};

/// Picks the category for an already-sanitized message.
///
/// Exactly one category is returned for every input; messages that match no
/// keyword land in [`DEFAULT_CATEGORY`].
pub fn classify(message: &str) -> &'static Category {
    let lowered = message.to_lowercase();
    CATEGORIES
        .iter()
        .find(|c| c.matches(&lowered))
        .unwrap_or(&DEFAULT_CATEGORY)
}

const FEVER: &str = "For fever management:

• **Rest** in a comfortable environment
• **Stay hydrated** with water, clear broths, or electrolyte drinks
• **Fever reducers**: Consider acetaminophen or ibuprofen as directed on packaging
• **Cool measures**: Light clothing, cool compresses, tepid baths
• **Monitor**: Keep track of temperature changes

**Seek immediate medical attention if:**
- Fever exceeds 103°F (39.4°C)
- Fever persists more than 3 days
- Accompanied by severe symptoms like difficulty breathing, chest pain, or severe headache
- Signs of dehydration appear";

const HEADACHE: &str = "For headache relief:

• **Rest** in a quiet, dark room
• **Hydration**: Drink plenty of water (dehydration is a common cause)
• **Cold/heat therapy**: Apply cold compress to forehead or warm compress to neck
• **Pain relievers**: Over-the-counter medications like acetaminophen or ibuprofen
• **Relaxation**: Try gentle neck stretches, meditation, or deep breathing

**Seek immediate medical care for:**
- Sudden, severe headache unlike any before
- Headache with fever, stiff neck, vision changes
- Headache after head injury
- Progressive worsening over days/weeks";

const DIABETES: &str = "Diabetes overview:

**Common symptoms:**
- Frequent urination and excessive thirst
- Unexplained weight loss or gain
- Extreme fatigue and weakness
- Blurred vision
- Slow-healing wounds
- Frequent infections

**Management strategies:**
- **Diet**: Focus on balanced meals, limit processed sugars
- **Exercise**: Regular physical activity helps control blood sugar
- **Monitoring**: Check blood glucose as recommended
- **Medications**: Take prescribed medications consistently
- **Regular check-ups**: Monitor A1C, blood pressure, cholesterol";

const BLOOD_PRESSURE: &str = "Blood pressure information:

**Understanding readings:**
- Normal: Less than 120/80 mmHg
- Elevated: 120-129 systolic, less than 80 diastolic
- High (Stage 1): 130-139/80-89 mmHg
- High (Stage 2): 140/90 mmHg or higher

**Management approaches:**
- **Diet**: Reduce sodium, increase potassium-rich foods
- **Exercise**: At least 150 minutes moderate activity weekly
- **Weight management**: Maintain healthy BMI
- **Stress reduction**: Practice relaxation techniques
- **Limit alcohol and avoid tobacco**
- **Medication**: Take as prescribed by healthcare provider";

const CARDIAC: &str = "⚠️ **IMPORTANT: Chest pain can be serious**

**Seek immediate emergency care (call 911) if experiencing:**
- Severe, crushing chest pain
- Pain radiating to arm, jaw, or back
- Shortness of breath
- Sweating, nausea, dizziness
- Feeling of impending doom

**Other chest pain causes may include:**
- Muscle strain
- Heartburn/GERD
- Anxiety
- Respiratory issues

**Never ignore chest pain** - when in doubt, seek immediate medical evaluation.";

const COLD_FLU: &str = "Cold and flu care:

**Symptom relief:**
- **Rest**: Get plenty of sleep to help immune system
- **Fluids**: Water, warm teas, broths help with hydration
- **Humidifier**: Moist air can ease congestion
- **Salt water gargle**: For sore throat relief
- **Over-the-counter medications**: Follow package directions

**When to see a doctor:**
- Symptoms worsen after initial improvement
- High fever (over 101.3°F) lasting more than 3 days
- Difficulty breathing or chest pain
- Severe headache or sinus pain
- Symptoms lasting more than 10 days";

const WELLNESS: &str = "General wellness tips:

**Physical health:**
- **Nutrition**: Eat a balanced diet with fruits, vegetables, whole grains
- **Exercise**: Aim for 150 minutes moderate activity weekly
- **Sleep**: 7-9 hours of quality sleep nightly
- **Hydration**: Drink adequate water throughout the day

**Preventive care:**
- **Regular check-ups**: Annual physical exams
- **Screenings**: Age-appropriate health screenings
- **Vaccinations**: Stay current with recommended vaccines
- **Mental health**: Practice stress management and seek support when needed";

const MENTAL_HEALTH: &str = "Mental health support:

**Managing stress and anxiety:**
- **Deep breathing**: Practice breathing exercises
- **Physical activity**: Regular exercise reduces stress
- **Sleep hygiene**: Maintain consistent sleep schedule
- **Social support**: Connect with friends, family, or support groups
- **Mindfulness**: Try meditation or mindfulness practices

**When to seek professional help:**
- Persistent sadness or anxiety
- Changes in sleep or appetite
- Difficulty functioning in daily activities
- Thoughts of self-harm

**Crisis resources:**
- National Suicide Prevention Lifeline: 988
- Crisis Text Line: Text HOME to 741741";

const MEDICATION: &str = "Medication safety:

**General guidelines:**
- **Follow prescriptions**: Take exactly as directed by your healthcare provider
- **Don't share**: Never share prescription medications
- **Storage**: Store medications properly (temperature, moisture, light)
- **Expiration**: Don't use expired medications
- **Interactions**: Inform all healthcare providers of all medications you take

**Questions to ask your pharmacist/doctor:**
- How and when to take the medication
- Possible side effects
- Drug interactions
- What to do if you miss a dose
- How long to take the medication";

const ALLERGY: &str = "Allergy management:

**Common allergy symptoms:**
- Sneezing, runny nose, congestion
- Itchy, watery eyes
- Skin reactions (rash, hives, eczema)
- Digestive issues (for food allergies)

**Management strategies:**
- **Avoidance**: Identify and avoid triggers when possible
- **Antihistamines**: Over-the-counter options for mild symptoms
- **Environment**: Use air purifiers, wash bedding frequently
- **Food allergies**: Read labels carefully, carry emergency medications if prescribed

**Seek emergency care for:**
- Severe allergic reaction (anaphylaxis)
- Difficulty breathing or swallowing
- Rapid pulse, dizziness, widespread rash";

const GENERAL: &str = "I'm here to help with general medical information. While I can provide educational information about various health topics, I want to emphasize that this should never replace professional medical advice.

**For immediate medical concerns:**
- Call 911 for emergencies
- Contact your healthcare provider
- Visit urgent care or emergency room if needed

**Some topics I can help with:**
- General information about common conditions
- Wellness and prevention tips
- When to seek medical care
- Basic symptom management
- Health maintenance advice

**What specific health topic would you like to know more about?**";
