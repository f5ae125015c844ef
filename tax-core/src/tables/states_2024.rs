//! 2024 state wage-income tax figures for single filers.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{Bracket, StateTaxInfo, StateTaxRegime};

const fn band(
    rate: Decimal,
    min: Decimal,
    max: Decimal,
) -> Bracket {
    Bracket::new(rate, min, Some(max))
}

const fn top(
    rate: Decimal,
    min: Decimal,
) -> Bracket {
    Bracket::new(rate, min, None)
}

const fn none(
    name: &'static str,
    abbreviation: &'static str,
    notable_credits: &'static [&'static str],
) -> StateTaxInfo {
    StateTaxInfo {
        name,
        abbreviation,
        regime: StateTaxRegime::None,
        flat_rate: None,
        brackets: &[],
        standard_deduction: None,
        notable_credits,
    }
}

const fn flat(
    name: &'static str,
    abbreviation: &'static str,
    rate: Decimal,
    standard_deduction: Option<Decimal>,
    notable_credits: &'static [&'static str],
) -> StateTaxInfo {
    StateTaxInfo {
        name,
        abbreviation,
        regime: StateTaxRegime::Flat,
        flat_rate: Some(rate),
        brackets: &[],
        standard_deduction,
        notable_credits,
    }
}

const fn progressive(
    name: &'static str,
    abbreviation: &'static str,
    brackets: &'static [Bracket],
    standard_deduction: Option<Decimal>,
    notable_credits: &'static [&'static str],
) -> StateTaxInfo {
    StateTaxInfo {
        name,
        abbreviation,
        regime: StateTaxRegime::Progressive,
        flat_rate: None,
        brackets,
        standard_deduction,
        notable_credits,
    }
}

pub(super) const STATES: &[StateTaxInfo] = &[
    progressive(
        "Alabama",
        "AL",
        &[
            band(dec!(0.02), dec!(0), dec!(500)),
            band(dec!(0.04), dec!(500), dec!(3000)),
            top(dec!(0.05), dec!(3000)),
        ],
        Some(dec!(2500)),
        &["Federal income tax paid is deductible on the Alabama return"],
    ),
    none(
        "Alaska",
        "AK",
        &["Permanent Fund Dividend paid to eligible residents"],
    ),
    flat(
        "Arizona",
        "AZ",
        dec!(0.025),
        Some(dec!(14600)),
        &["Family tax credit", "Credits for donations to qualifying charitable organizations"],
    ),
    progressive(
        "Arkansas",
        "AR",
        &[
            band(dec!(0), dec!(0), dec!(5499)),
            band(dec!(0.02), dec!(5499), dec!(10899)),
            band(dec!(0.03), dec!(10899), dec!(15599)),
            band(dec!(0.034), dec!(15599), dec!(25699)),
            top(dec!(0.039), dec!(25699)),
        ],
        Some(dec!(2340)),
        &[],
    ),
    progressive(
        "California",
        "CA",
        &[
            band(dec!(0.01), dec!(0), dec!(10756)),
            band(dec!(0.02), dec!(10756), dec!(25499)),
            band(dec!(0.04), dec!(25499), dec!(40245)),
            band(dec!(0.06), dec!(40245), dec!(55866)),
            band(dec!(0.08), dec!(55866), dec!(70606)),
            band(dec!(0.093), dec!(70606), dec!(360659)),
            band(dec!(0.103), dec!(360659), dec!(432787)),
            band(dec!(0.113), dec!(432787), dec!(721314)),
            top(dec!(0.123), dec!(721314)),
        ],
        Some(dec!(5540)),
        &[
            "California Earned Income Tax Credit (CalEITC)",
            "Young Child Tax Credit",
            "Renter's credit",
        ],
    ),
    flat(
        "Colorado",
        "CO",
        dec!(0.0425),
        Some(dec!(14600)),
        &["Colorado Child Tax Credit", "TABOR refund"],
    ),
    progressive(
        "Connecticut",
        "CT",
        &[
            band(dec!(0.02), dec!(0), dec!(10000)),
            band(dec!(0.045), dec!(10000), dec!(50000)),
            band(dec!(0.055), dec!(50000), dec!(100000)),
            band(dec!(0.06), dec!(100000), dec!(200000)),
            band(dec!(0.065), dec!(200000), dec!(250000)),
            band(dec!(0.069), dec!(250000), dec!(500000)),
            top(dec!(0.0699), dec!(500000)),
        ],
        None,
        &["Property tax credit"],
    ),
    progressive(
        "Delaware",
        "DE",
        &[
            band(dec!(0), dec!(0), dec!(2000)),
            band(dec!(0.022), dec!(2000), dec!(5000)),
            band(dec!(0.039), dec!(5000), dec!(10000)),
            band(dec!(0.048), dec!(10000), dec!(20000)),
            band(dec!(0.052), dec!(20000), dec!(25000)),
            band(dec!(0.0555), dec!(25000), dec!(60000)),
            top(dec!(0.066), dec!(60000)),
        ],
        Some(dec!(3250)),
        &[],
    ),
    progressive(
        "District of Columbia",
        "DC",
        &[
            band(dec!(0.04), dec!(0), dec!(10000)),
            band(dec!(0.06), dec!(10000), dec!(40000)),
            band(dec!(0.065), dec!(40000), dec!(60000)),
            band(dec!(0.085), dec!(60000), dec!(250000)),
            band(dec!(0.0925), dec!(250000), dec!(500000)),
            band(dec!(0.0975), dec!(500000), dec!(1000000)),
            top(dec!(0.1075), dec!(1000000)),
        ],
        Some(dec!(14600)),
        &["DC Earned Income Tax Credit"],
    ),
    none(
        "Florida",
        "FL",
        &["No state income tax"],
    ),
    flat(
        "Georgia",
        "GA",
        dec!(0.0539),
        Some(dec!(12000)),
        &[],
    ),
    progressive(
        "Hawaii",
        "HI",
        &[
            band(dec!(0.014), dec!(0), dec!(2400)),
            band(dec!(0.032), dec!(2400), dec!(4800)),
            band(dec!(0.055), dec!(4800), dec!(9600)),
            band(dec!(0.064), dec!(9600), dec!(14400)),
            band(dec!(0.068), dec!(14400), dec!(19200)),
            band(dec!(0.072), dec!(19200), dec!(24000)),
            band(dec!(0.076), dec!(24000), dec!(36000)),
            band(dec!(0.079), dec!(36000), dec!(48000)),
            band(dec!(0.0825), dec!(48000), dec!(150000)),
            band(dec!(0.09), dec!(150000), dec!(175000)),
            band(dec!(0.10), dec!(175000), dec!(200000)),
            top(dec!(0.11), dec!(200000)),
        ],
        Some(dec!(2200)),
        &["Food/excise tax credit"],
    ),
    flat(
        "Idaho",
        "ID",
        dec!(0.05695),
        Some(dec!(14600)),
        &["Grocery credit"],
    ),
    flat(
        "Illinois",
        "IL",
        dec!(0.0495),
        Some(dec!(2775)),
        &["Property tax credit", "K-12 education expense credit"],
    ),
    flat(
        "Indiana",
        "IN",
        dec!(0.0305),
        Some(dec!(1000)),
        &["County income taxes apply in addition to the state rate"],
    ),
    progressive(
        "Iowa",
        "IA",
        &[
            band(dec!(0.044), dec!(0), dec!(6210)),
            band(dec!(0.0482), dec!(6210), dec!(31050)),
            top(dec!(0.057), dec!(31050)),
        ],
        None,
        &[],
    ),
    progressive(
        "Kansas",
        "KS",
        &[
            band(dec!(0.031), dec!(0), dec!(15000)),
            band(dec!(0.0525), dec!(15000), dec!(30000)),
            top(dec!(0.057), dec!(30000)),
        ],
        Some(dec!(3500)),
        &[],
    ),
    flat(
        "Kentucky",
        "KY",
        dec!(0.04),
        Some(dec!(3160)),
        &[],
    ),
    progressive(
        "Louisiana",
        "LA",
        &[
            band(dec!(0.0185), dec!(0), dec!(12500)),
            band(dec!(0.035), dec!(12500), dec!(50000)),
            top(dec!(0.0425), dec!(50000)),
        ],
        Some(dec!(4500)),
        &[],
    ),
    progressive(
        "Maine",
        "ME",
        &[
            band(dec!(0.058), dec!(0), dec!(26050)),
            band(dec!(0.0675), dec!(26050), dec!(61600)),
            top(dec!(0.0715), dec!(61600)),
        ],
        Some(dec!(14600)),
        &["Property tax fairness credit"],
    ),
    progressive(
        "Maryland",
        "MD",
        &[
            band(dec!(0.02), dec!(0), dec!(1000)),
            band(dec!(0.03), dec!(1000), dec!(2000)),
            band(dec!(0.04), dec!(2000), dec!(3000)),
            band(dec!(0.0475), dec!(3000), dec!(100000)),
            band(dec!(0.05), dec!(100000), dec!(125000)),
            band(dec!(0.0525), dec!(125000), dec!(150000)),
            band(dec!(0.055), dec!(150000), dec!(250000)),
            top(dec!(0.0575), dec!(250000)),
        ],
        Some(dec!(2550)),
        &["County income taxes apply in addition to the state rate"],
    ),
    flat(
        "Massachusetts",
        "MA",
        dec!(0.05),
        Some(dec!(4400)),
        &["4% surtax on income over $1,053,750"],
    ),
    flat(
        "Michigan",
        "MI",
        dec!(0.0425),
        Some(dec!(5600)),
        &["Homestead property tax credit"],
    ),
    progressive(
        "Minnesota",
        "MN",
        &[
            band(dec!(0.0535), dec!(0), dec!(31690)),
            band(dec!(0.068), dec!(31690), dec!(104090)),
            band(dec!(0.0785), dec!(104090), dec!(193240)),
            top(dec!(0.0985), dec!(193240)),
        ],
        Some(dec!(14575)),
        &["Minnesota Child Tax Credit", "Renter's credit"],
    ),
    progressive(
        "Mississippi",
        "MS",
        &[
            band(dec!(0), dec!(0), dec!(10000)),
            top(dec!(0.047), dec!(10000)),
        ],
        Some(dec!(2300)),
        &[],
    ),
    progressive(
        "Missouri",
        "MO",
        &[
            band(dec!(0), dec!(0), dec!(1273)),
            band(dec!(0.02), dec!(1273), dec!(2546)),
            band(dec!(0.025), dec!(2546), dec!(3819)),
            band(dec!(0.03), dec!(3819), dec!(5092)),
            band(dec!(0.035), dec!(5092), dec!(6365)),
            band(dec!(0.04), dec!(6365), dec!(7638)),
            band(dec!(0.045), dec!(7638), dec!(8911)),
            top(dec!(0.048), dec!(8911)),
        ],
        Some(dec!(14600)),
        &[],
    ),
    progressive(
        "Montana",
        "MT",
        &[
            band(dec!(0.047), dec!(0), dec!(20500)),
            top(dec!(0.059), dec!(20500)),
        ],
        Some(dec!(14600)),
        &[],
    ),
    progressive(
        "Nebraska",
        "NE",
        &[
            band(dec!(0.0246), dec!(0), dec!(3900)),
            band(dec!(0.0351), dec!(3900), dec!(23370)),
            band(dec!(0.0501), dec!(23370), dec!(37670)),
            top(dec!(0.0584), dec!(37670)),
        ],
        Some(dec!(8300)),
        &[],
    ),
    none(
        "Nevada",
        "NV",
        &["No state income tax"],
    ),
    none(
        "New Hampshire",
        "NH",
        &["No tax on wages; 3% tax on interest and dividends for 2024, repealed from 2025"],
    ),
    progressive(
        "New Jersey",
        "NJ",
        &[
            band(dec!(0.014), dec!(0), dec!(20000)),
            band(dec!(0.0175), dec!(20000), dec!(35000)),
            band(dec!(0.035), dec!(35000), dec!(40000)),
            band(dec!(0.05525), dec!(40000), dec!(75000)),
            band(dec!(0.0637), dec!(75000), dec!(500000)),
            band(dec!(0.0897), dec!(500000), dec!(1000000)),
            top(dec!(0.1075), dec!(1000000)),
        ],
        Some(dec!(1000)),
        &["ANCHOR property tax relief", "New Jersey Child Tax Credit"],
    ),
    progressive(
        "New Mexico",
        "NM",
        &[
            band(dec!(0.017), dec!(0), dec!(5500)),
            band(dec!(0.032), dec!(5500), dec!(11000)),
            band(dec!(0.047), dec!(11000), dec!(16000)),
            band(dec!(0.049), dec!(16000), dec!(210000)),
            top(dec!(0.059), dec!(210000)),
        ],
        Some(dec!(14600)),
        &["Working Families Tax Credit"],
    ),
    progressive(
        "New York",
        "NY",
        &[
            band(dec!(0.04), dec!(0), dec!(8500)),
            band(dec!(0.045), dec!(8500), dec!(11700)),
            band(dec!(0.0525), dec!(11700), dec!(13900)),
            band(dec!(0.055), dec!(13900), dec!(80650)),
            band(dec!(0.06), dec!(80650), dec!(215400)),
            band(dec!(0.0685), dec!(215400), dec!(1077550)),
            band(dec!(0.0965), dec!(1077550), dec!(5000000)),
            band(dec!(0.103), dec!(5000000), dec!(25000000)),
            top(dec!(0.109), dec!(25000000)),
        ],
        Some(dec!(8000)),
        &["Empire State Child Credit", "New York City residents owe city income tax"],
    ),
    flat(
        "North Carolina",
        "NC",
        dec!(0.045),
        Some(dec!(12750)),
        &[],
    ),
    progressive(
        "North Dakota",
        "ND",
        &[
            band(dec!(0), dec!(0), dec!(47150)),
            band(dec!(0.0195), dec!(47150), dec!(238200)),
            top(dec!(0.025), dec!(238200)),
        ],
        Some(dec!(14600)),
        &[],
    ),
    progressive(
        "Ohio",
        "OH",
        &[
            band(dec!(0), dec!(0), dec!(26050)),
            band(dec!(0.0275), dec!(26050), dec!(100000)),
            top(dec!(0.035), dec!(100000)),
        ],
        None,
        &["Municipal income taxes apply in most cities"],
    ),
    progressive(
        "Oklahoma",
        "OK",
        &[
            band(dec!(0.0025), dec!(0), dec!(1000)),
            band(dec!(0.0075), dec!(1000), dec!(2500)),
            band(dec!(0.0175), dec!(2500), dec!(3750)),
            band(dec!(0.0275), dec!(3750), dec!(4900)),
            band(dec!(0.0375), dec!(4900), dec!(7200)),
            top(dec!(0.0475), dec!(7200)),
        ],
        Some(dec!(6350)),
        &[],
    ),
    progressive(
        "Oregon",
        "OR",
        &[
            band(dec!(0.0475), dec!(0), dec!(4300)),
            band(dec!(0.0675), dec!(4300), dec!(10750)),
            band(dec!(0.0875), dec!(10750), dec!(125000)),
            top(dec!(0.099), dec!(125000)),
        ],
        Some(dec!(2745)),
        &["Kicker credit when revenue exceeds forecasts"],
    ),
    flat(
        "Pennsylvania",
        "PA",
        dec!(0.0307),
        None,
        &["Tax forgiveness credit for low-income households", "Local earned income taxes apply"],
    ),
    progressive(
        "Rhode Island",
        "RI",
        &[
            band(dec!(0.0375), dec!(0), dec!(77450)),
            band(dec!(0.0475), dec!(77450), dec!(176050)),
            top(dec!(0.0599), dec!(176050)),
        ],
        Some(dec!(10550)),
        &[],
    ),
    progressive(
        "South Carolina",
        "SC",
        &[
            band(dec!(0), dec!(0), dec!(3460)),
            band(dec!(0.03), dec!(3460), dec!(17330)),
            top(dec!(0.062), dec!(17330)),
        ],
        Some(dec!(14600)),
        &[],
    ),
    none(
        "South Dakota",
        "SD",
        &["No state income tax"],
    ),
    none(
        "Tennessee",
        "TN",
        &["No state income tax; the Hall tax on investment income was repealed in 2021"],
    ),
    none(
        "Texas",
        "TX",
        &["No state income tax"],
    ),
    flat(
        "Utah",
        "UT",
        dec!(0.0455),
        None,
        &["Taxpayer tax credit replaces a standard deduction"],
    ),
    progressive(
        "Vermont",
        "VT",
        &[
            band(dec!(0.0335), dec!(0), dec!(45400)),
            band(dec!(0.066), dec!(45400), dec!(110050)),
            band(dec!(0.076), dec!(110050), dec!(229550)),
            top(dec!(0.0875), dec!(229550)),
        ],
        Some(dec!(7400)),
        &["Vermont Child Tax Credit"],
    ),
    progressive(
        "Virginia",
        "VA",
        &[
            band(dec!(0.02), dec!(0), dec!(3000)),
            band(dec!(0.03), dec!(3000), dec!(5000)),
            band(dec!(0.05), dec!(5000), dec!(17000)),
            top(dec!(0.0575), dec!(17000)),
        ],
        Some(dec!(8000)),
        &[],
    ),
    none(
        "Washington",
        "WA",
        &["No tax on wages; 7% tax on long-term capital gains above $262,000"],
    ),
    progressive(
        "West Virginia",
        "WV",
        &[
            band(dec!(0.0236), dec!(0), dec!(10000)),
            band(dec!(0.0315), dec!(10000), dec!(25000)),
            band(dec!(0.0354), dec!(25000), dec!(40000)),
            band(dec!(0.0472), dec!(40000), dec!(60000)),
            top(dec!(0.0512), dec!(60000)),
        ],
        None,
        &[],
    ),
    progressive(
        "Wisconsin",
        "WI",
        &[
            band(dec!(0.035), dec!(0), dec!(14320)),
            band(dec!(0.044), dec!(14320), dec!(28640)),
            band(dec!(0.053), dec!(28640), dec!(315310)),
            top(dec!(0.0765), dec!(315310)),
        ],
        Some(dec!(13230)),
        &["Homestead credit"],
    ),
    none(
        "Wyoming",
        "WY",
        &["No state income tax"],
    ),
];
