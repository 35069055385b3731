use solana_sdk::{pubkey, pubkey::Pubkey};

/// Byte size of an spl-governance `GovernanceV2` account.
pub const GOVERNANCE_ACCOUNT_SIZE: u64 = 325;

/// Lamports carry 9 decimals.
pub const NATIVE_DECIMALS: u8 = 9;

pub const TOKEN_PROGRAM_ID: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

pub const WRAPPED_SOL_MINT: Pubkey = pubkey!("So11111111111111111111111111111111111111112");

pub const DEFAULT_PRICE_API_URL: &str = "https://price.jup.ag/v4/price";

/// Governance program deployments included in the TVL when none are configured.
pub const DEFAULT_GOVERNANCE_PROGRAM_IDS: [Pubkey; 25] = [
    pubkey!("GovER5Lthms3bLBqWub97yVrMmEogzX7xNjdXpPPCVZw"),
    pubkey!("gUAedF544JeE6NYbQakQvribHykUNgaPJqcgf3UQVnY"),
    pubkey!("GqTPL6qRf5aUuqscLh8Rg2HTxPUXfhhAXDptTLhp1t2J"),
    pubkey!("DcG2PZTnj8s4Pnmp7xJswniCskckU5E6XsrKuyD7NYFK"),
    pubkey!("AEauWRrpn9Cs6GXujzdp1YhMmv2288kBt3SdEcPYEerr"),
    pubkey!("G41fmJzd29v7Qmdi8ZyTBBYa98ghh3cwHBTexqCG1PQJ"),
    pubkey!("GovHgfDPyQ1GwazJTDY2avSVY8GGcpmCapmmCsymRaGe"),
    pubkey!("pytGY6tWRgGinSCvRLnSv4fHfBTMoiDGiCsesmHWM6U"),
    pubkey!("J9uWvULFL47gtCPvgR3oN7W357iehn5WF2Vn9MJvcSxz"),
    pubkey!("JPGov2SBA6f7XSJF5R4Si5jEJekGiyrwP2m7gSEqLUs"),
    pubkey!("Ghope52FuF6HU3AAhJuAAyS2fiqbVhkAotb7YprL5tdS"),
    pubkey!("5sGZEdn32y8nHax7TxEyoHuPS3UXfPWtisgm8kqxat8H"),
    pubkey!("smfjietFKFJ4Sbw1cqESBTpPhF4CwbMwN8kBEC1e5ui"),
    pubkey!("GovMaiHfpVPw8BAM1mbdzgmSZYDw2tdP32J2fapoQoYs"),
    pubkey!("GCockTxUjxuMdojHiABVZ5NKp6At8eTKDiizbPjiCo4m"),
    pubkey!("HT19EcD68zn7NoCF79b2ucQF8XaMdowyPt5ccS6g1PUx"),
    pubkey!("GRNPT8MPw3LYY6RdjsgKeFji5kMiG1fSxnxDjDBu4s73"),
    pubkey!("ALLGnZikNaJQeN4KCAbDjZRSzvSefUdeTpk18yfizZvT"),
    pubkey!("A7kmu2kUcnQwAVn8B4znQmGJeUrsJ1WEhYVMtmiBLkEr"),
    pubkey!("MGovW65tDhMMcpEmsegpsdgvzb6zUwGsNjhXFxRAnjd"),
    pubkey!("jdaoDN37BrVRvxuXSeyR7xE5Z9CAoQApexGrQJbnj6V"),
    pubkey!("GMnke6kxYvqoAXgbFGnu84QzvNHoqqTnijWSXYYTFQbB"),
    pubkey!("hgovkRU6Ghe1Qoyb54HdSLdqN7VtxaifBzRmh9jtd3S"),
    pubkey!("jtogvBNH3WBSWDYD5FJfQP2ZxNTuf82zL8GkEhPeaJx"),
    pubkey!("dgov7NC8iaumWw3k8TkmLDybvZBCmd1qwxgLAGAsWxf"),
];
