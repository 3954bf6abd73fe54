//! Static resume content shown in the overlay panes

use serde::Serialize;

use crate::section::Section;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Education {
    pub degree: &'static str,
    pub school: &'static str,
    pub period: &'static str,
    pub score: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfilePane {
    pub name: &'static str,
    pub title: &'static str,
    pub summary: &'static [&'static str],
    pub education: &'static [Education],
    pub statement: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Experience {
    pub role: &'static str,
    pub company: &'static str,
    pub period: &'static str,
    pub details: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkillCategory {
    pub name: &'static str,
    pub skills: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AchievementsPane {
    pub accomplishments: &'static [&'static str],
    pub publications: &'static [&'static str],
    pub certifications: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContactPane {
    pub blurb: &'static str,
    pub email: &'static str,
    pub location: &'static str,
}

/// Content renderer selected for a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "section", content = "content", rename_all = "lowercase")]
pub enum Pane {
    Profile(&'static ProfilePane),
    Experience(&'static [Experience]),
    Skills(&'static [SkillCategory]),
    Achievements(&'static AchievementsPane),
    Contact(&'static ContactPane),
}

impl Pane {
    /// Heading shown at the top of the pane
    pub fn heading(&self) -> &'static str {
        match self {
            Pane::Profile(_) => "IDENTITY // PROFILE",
            Pane::Experience(_) => "MISSION_LOGS // EXPERIENCE",
            Pane::Skills(_) => "SYSTEM_CAPABILITIES // ARSENAL",
            Pane::Achievements(_) => "HALL_OF_FAME // ACHIEVEMENTS",
            Pane::Contact(_) => "ESTABLISH_UPLINK // CONTACT",
        }
    }
}

/// Pane for a section, `None` when no section is open
pub fn content_for(section: Option<Section>) -> Option<Pane> {
    let pane = match section? {
        Section::Profile => Pane::Profile(&PROFILE),
        Section::Experience => Pane::Experience(EXPERIENCE),
        Section::Skills => Pane::Skills(SKILLS),
        Section::Achievements => Pane::Achievements(&ACHIEVEMENTS),
        Section::Contact => Pane::Contact(&CONTACT),
    };
    Some(pane)
}

/// Fixed HUD strings around the scene and overlay
pub struct Hud;

impl Hud {
    pub const CALLSIGN: &'static str = "DEEPAK.SEC";
    pub const MISSION_STATUS: &'static str = "Mission_Status: ACTIVE // System_Load: STABLE";
    pub const LOCATION: &'static str = "Location: CYBER_CITY_NODE_01";
    pub const CONNECTION_TYPE: &'static str = "Secure_Shell_AES-256";
    pub const TERMINAL_KEY: &'static str = "VIRD_HUNTER_0.1";
    pub const FOOTER_LEFT: &'static str = "System: ONLINE";
    pub const FOOTER_RIGHT: &'static str = "Encrypted Connection: TLS 1.3";

    /// Overlay title bar, e.g. `ROOT@MAINFRAME:~/SKILLS`
    pub fn terminal_title(section: Section) -> String {
        format!("ROOT@MAINFRAME:~/{}", section.as_str().to_uppercase())
    }

    /// Uptime readout formatted as `DD:HH:MM:SS`
    pub fn uptime(elapsed_secs: f64) -> String {
        let total = elapsed_secs.max(0.0) as u64;
        format!(
            "Uptime: {:02}:{:02}:{:02}:{:02}",
            total / 86_400,
            (total / 3600) % 24,
            (total / 60) % 60,
            total % 60
        )
    }
}

pub static PROFILE: ProfilePane = ProfilePane {
    name: "DEEPAK DHIMAN",
    title: "Application Security Engineer",
    summary: &[
        "Security researcher and application-security engineer with 5+ years of hands-on experience across web, API, mobile (Android/iOS) and microservice environments.",
        "Offensive-first testing, threat modeling and secure-SDLC practices to find and close real abuse paths in product flows (auth, payments, session management).",
        "Comfortable embedding security into CI/CD, creating POCs and working directly with engineering teams to ship fixes.",
    ],
    education: &[
        Education {
            degree: "B. Tech in Computer Science Engineering",
            school: "Kurukshetra University",
            period: "08/2017 – 05/2020",
            score: "79%",
        },
        Education {
            degree: "Diploma in Computer Science Engineering",
            school: "GBN Polytechnic",
            period: "08/2015 – 05/2017",
            score: "80%",
        },
    ],
    statement: "I treat AppSec not as vulnerability listing but as a continuous mapping of how trust breaks in real product flows.",
};

pub static EXPERIENCE: &[Experience] = &[
    Experience {
        role: "Product Security Consultant",
        company: "Emirates NBD via Forward Defense",
        period: "02/2025 – Present",
        details: &[
            "Performed targeted security assessments for web, Android and iOS applications in microservice architectures.",
            "Ran threat modeling sessions from feature ideation to architecture review and translated risks into developer-actionable remediation.",
            "Embedded security checks into sprint cycles and CI/CD pipelines to enable shift-left testing.",
            "Used Semgrep / Checkmarx / Burp Suite Pro for SAST/DAST and SCA for dependency/security supply-chain checks.",
            "Monitored container runtimes and microservice behavior (Sysdig) to detect misconfigurations and runtime anomalies.",
            "Built POCs and exploit chains for auth/payment/session abuse and worked with engineers until issues were fixed.",
            "Reviewed design docs & feature proposals and flagged abuse cases before code was written.",
            "Reverse engineered client-side logic to identify hidden trust assumptions and weak enforcement boundaries.",
            "Created threat scenarios that modelled 'how a malicious actor would chain normal features into exploitation'.",
        ],
    },
    Experience {
        role: "Security Consultant",
        company: "Ampcus Cyber",
        period: "02/2024 – 02/2025",
        details: &[
            "Conducted web, API and mobile (Android/iOS) security engagements with emphasis on business-logic abuse.",
            "Built automation scripts to remove repetitive manual steps and scale testing.",
            "Led OSINT-driven attack-surface discovery, red-team simulations and social-engineering exercises.",
        ],
    },
    Experience {
        role: "Cyber Security Specialist",
        company: "Network Intelligence India",
        period: "10/2021 – 12/2023",
        details: &[
            "Led VAPT for Web, Mobile & Infrastructure.",
            "Performed Firewall & WiFi security reviews.",
            "Led OSINT-driven attack-surface discovery and red-team simulations.",
        ],
    },
];

pub static SKILLS: &[SkillCategory] = &[
    SkillCategory {
        name: "Application Security & VAPT",
        skills: &["Web", "API", "Mobile (Android/iOS)", "Thick Client", "AD", "Network"],
    },
    SkillCategory {
        name: "DevSecOps & Tools",
        skills: &[
            "CI/CD Security",
            "Semgrep",
            "Checkmarx",
            "Burp Suite Pro",
            "Sysdig",
            "Trufflehog",
            "OWASP ZAP",
            "Kibana",
            "Red Panda",
        ],
    },
    SkillCategory {
        name: "Red Teaming & OSINT",
        skills: &[
            "Phishing",
            "Social Engineering",
            "Attack Simulations",
            "OSINT Recon",
            "Asset Discovery",
        ],
    },
    SkillCategory {
        name: "Specialized Testing",
        skills: &[
            "IoT Pentesting",
            "MIoT (Medical Devices)",
            "DICOM",
            "HL7",
            "FDA 501",
            "PACS",
            "Web LLM Attacks",
        ],
    },
    SkillCategory {
        name: "Standards & Config",
        skills: &[
            "OWASP Top 10",
            "NIST",
            "PCI-DSS",
            "MITRE ATT&CK",
            "Firewall/WAF Reviews",
            "IDS/IPS",
        ],
    },
];

pub static ACHIEVEMENTS: AchievementsPane = AchievementsPane {
    accomplishments: &[
        "200+ Hall of Fame mentions (Google, Dell, Blackboard, NCIIPC).",
        "Top 10 Hackenproof researcher (2022).",
        "Delivered Project Oman – manual Web/WiFi/Network Pentest in 20 days with client appreciation.",
        "Building a corporate Banking product from scratch in current Organisation.",
    ],
    publications: &[
        "Interview with XSSRAT (2023)",
        "Security write-ups on Medium",
        "Contributor to GitHub HowToHunt repo",
        "YouTube (Virdoex) Bug Hunting",
        "Podcast: The Cyber Explorers",
    ],
    certifications: &[
        "eWPTXv2 – Adv Web Pentesting",
        "eCPPT v2 – Pentesting Prof",
        "API Penetration Testing",
        "Certified AppSec Practitioner",
        "Threat Modeling Security Fundamentals",
    ],
};

pub static CONTACT: ContactPane = ContactPane {
    blurb: "Initiate a secure communication channel. All messages are encrypted end-to-end. Available for consulting, security audits, and speaking engagements.",
    email: "virdoexhunter@gmail.com",
    location: "LOC: Bellandur, Bengaluru 560103",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_for_is_total() {
        assert_eq!(content_for(None), None);
        for section in Section::ALL {
            let pane = content_for(Some(section)).unwrap();
            let matches = matches!(
                (section, pane),
                (Section::Profile, Pane::Profile(_))
                    | (Section::Experience, Pane::Experience(_))
                    | (Section::Skills, Pane::Skills(_))
                    | (Section::Achievements, Pane::Achievements(_))
                    | (Section::Contact, Pane::Contact(_))
            );
            assert!(matches, "{section} mapped to the wrong pane");
        }
    }

    #[test]
    fn test_terminal_title() {
        assert_eq!(Hud::terminal_title(Section::Skills), "ROOT@MAINFRAME:~/SKILLS");
    }

    #[test]
    fn test_uptime_format() {
        assert_eq!(Hud::uptime(923.7), "Uptime: 00:00:15:23");
        assert_eq!(Hud::uptime(90_061.0), "Uptime: 01:01:01:01");
    }

    #[test]
    fn test_pane_serializes_with_section_tag() {
        let json = serde_json::to_value(content_for(Some(Section::Skills)).unwrap()).unwrap();
        assert_eq!(json["section"], "skills");
        assert_eq!(json["content"][0]["name"], "Application Security & VAPT");
    }
}
