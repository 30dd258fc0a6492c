//! Built-in catalog entries loaded at startup.

use fishpedia_shared::{Comment, CommentId, Fish, FishId, Media, MediaKind};

fn image(id: &str, seed: &str) -> Media {
    Media::remote(
        id,
        MediaKind::Image,
        &format!("https://picsum.photos/seed/{seed}/800/600"),
    )
}

fn comment(id: &str, author: &str, text: &str) -> Comment {
    Comment {
        id: CommentId::from(id),
        author_name: author.to_string(),
        text: text.to_string(),
    }
}

/// The seed collection, in display order.
pub fn seed_fish() -> Vec<Fish> {
    vec![
        Fish {
            id: FishId::from("1"),
            name: "カクレクマノミ".into(),
            name_en: Some("Clownfish".into()),
            scientific_name: "Amphiprioninae".into(),
            description: "クラウンフィッシュまたはイソギンチャクフィッシュは、スズメダイ科クマノミ亜科の魚です。30種が知られており、1種がPremnas属、残りがAmphiprion属に属します。".into(),
            description_en: Some("Clownfish or anemonefish are fishes from the subfamily Amphiprioninae in the family Pomacentridae. Thirty species are recognized: one in the genus Premnas, while the remaining are in the genus Amphiprion.".into()),
            habitat: "インド洋および太平洋の暖かい海域、グレートバリアリーフや紅海を含む。".into(),
            media: vec![image("m1-1", "clownfish"), image("m1-2", "clownfish2")],
            comments: vec![
                comment("c1-1", "AquaFan", "ファインディング・ニモで有名ですよね！"),
                comment("c1-2", "Diver_Ken", "イソギンチャクとの共生が面白い。"),
            ],
        },
        Fish {
            id: FishId::from("2"),
            name: "ツノダシ".into(),
            name_en: Some("Moorish Idol".into()),
            scientific_name: "Zanclus cornutus".into(),
            description: "ツノダシは、スズメダイ目ツノダシ科の唯一の現生種である海水魚です。熱帯から亜熱帯のサンゴ礁やラグーンに広く生息し、インド太平洋に広く分布することで知られています。".into(),
            description_en: Some("The Moorish idol is a marine fish species, the sole extant representative of the family Zanclidae in order an Acanthuriformes. A common inhabitant of tropical to subtropical reefs and lagoons, the Moorish idol is notable for its wide distribution throughout the Indo-Pacific.".into()),
            habitat: "インド太平洋のサンゴ礁。".into(),
            media: vec![image("m2-1", "moorishidol")],
            comments: vec![],
        },
        Fish {
            id: FishId::from("3"),
            name: "ナンヨウハギ".into(),
            name_en: Some("Blue Tang".into()),
            scientific_name: "Paracanthurus hepatus".into(),
            description: "ナンヨウハギは、インド太平洋に生息するニザダイ科の魚です。観賞魚として人気があり、Paracanthurus属の唯一のメンバーです。ロイヤルブルータン、リーガルタン、パレットサージョンフィッシュなど、多くの一般名で知られています。".into(),
            description_en: Some("Paracanthurus hepatus is a species of Indo-Pacific surgeonfish. A popular fish in marine aquaria, it is the only member of the genus Paracanthurus. It is known by many common names, including royal blue tang, regal tang, palette surgeonfish, and blue surgeonfish.".into()),
            habitat: "インド太平洋。東アフリカからミクロネシア、北は日本、南はグレートバリアリーフまで見られます。".into(),
            media: vec![image("m3-1", "bluetang"), image("m3-2", "bluetang2")],
            comments: vec![],
        },
    ]
}
